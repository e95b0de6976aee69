#![forbid(unsafe_code)]

//! Full-screen image viewer shared by all vehicle cards.
//!
//! Transitions take the state by value and return the next one, so the
//! overlay has no hidden global: the owner swaps in whatever comes back and
//! re-renders from it.

/// Overlay state: the owning card's image list and the shown position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightboxState {
    images: Vec<String>,
    index: usize,
    open: bool,
}

impl LightboxState {
    /// Closed overlay with no images.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Open on `images[index]`.
    ///
    /// `index` is clamped into the list; an empty list yields a closed state.
    #[must_use]
    pub fn open(images: Vec<String>, index: usize) -> Self {
        if images.is_empty() {
            return Self::closed();
        }
        let index = index.min(images.len() - 1);
        Self {
            images,
            index,
            open: true,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        self.step(1)
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let n = self.images.len();
        self.step(n.saturating_sub(1))
    }

    /// Hide the overlay. The image list is kept until the next open.
    #[must_use]
    pub fn close(mut self) -> Self {
        self.open = false;
        self
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// URL of the shown image while open.
    #[must_use]
    pub fn current_src(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.images.get(self.index).map(String::as_str)
    }

    fn step(mut self, by: usize) -> Self {
        let n = self.images.len();
        if !self.open || n == 0 {
            return self;
        }
        self.index = (self.index + by) % n;
        self
    }
}
