#![forbid(unsafe_code)]

//! Per-card vehicle image carousel.
//!
//! A carousel tracks two indices. `visible` is the image shown in wide mode
//! (one image visible, the rest hidden). `current` drives the dot indicator.
//! They only diverge in narrow mode, where native scrolling shows the images
//! and the strip's scroll position only moves the dot.

/// Index state of one card's carousel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselState {
    current: usize,
    visible: usize,
    count: usize,
}

impl CarouselState {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self {
            current: 0,
            visible: 0,
            count,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Index of the active dot.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Index of the image rendered as visible.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Show image `index`, wrapping with floored modulo.
    ///
    /// Returns the normalized index, or `None` for an empty carousel.
    pub fn show(&mut self, index: isize) -> Option<usize> {
        let normalized = normalize_index(index, self.count)?;
        self.current = normalized;
        self.visible = normalized;
        Some(normalized)
    }

    pub fn next(&mut self) -> Option<usize> {
        self.show(self.current_isize() + 1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.show(self.current_isize() - 1)
    }

    /// Move the dot to the page the strip is scrolled to.
    ///
    /// Leaves `visible` alone: in narrow mode the strip itself shows images.
    pub fn sync_from_scroll(&mut self, scroll_left: f64, strip_width: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let index = scroll_page(scroll_left, strip_width, self.count);
        self.current = index;
        Some(index)
    }

    fn current_isize(&self) -> isize {
        isize::try_from(self.current).unwrap_or(isize::MAX)
    }
}

/// Floored modulo of `index` into `[0, count)`.
#[must_use]
pub fn normalize_index(index: isize, count: usize) -> Option<usize> {
    let count = isize::try_from(count).ok().filter(|&c| c > 0)?;
    usize::try_from(index.rem_euclid(count)).ok()
}

/// `round(scroll_left / strip_width)` clamped to `[0, count - 1]`.
#[must_use]
pub fn scroll_page(scroll_left: f64, strip_width: f64, count: usize) -> usize {
    let last = count.saturating_sub(1);
    if strip_width.is_nan() || strip_width <= 0.0 || !scroll_left.is_finite() {
        return 0;
    }
    let page = (scroll_left / strip_width).round();
    if page <= 0.0 {
        0
    } else if page >= last as f64 {
        last
    } else {
        page as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_wraps_negative_and_large_indices() {
        let mut carousel = CarouselState::new(3);
        assert_eq!(carousel.show(-1), Some(2));
        assert_eq!(carousel.show(3), Some(0));
        assert_eq!(carousel.show(-7), Some(2));
        assert_eq!(carousel.visible(), 2);
    }

    #[test]
    fn prev_from_first_goes_to_last() {
        let mut carousel = CarouselState::new(4);
        assert_eq!(carousel.prev(), Some(3));
        assert_eq!(carousel.next(), Some(0));
    }

    #[test]
    fn empty_carousel_ignores_navigation() {
        let mut carousel = CarouselState::new(0);
        assert_eq!(carousel.show(2), None);
        assert_eq!(carousel.next(), None);
        assert_eq!(carousel.sync_from_scroll(100.0, 300.0), None);
    }

    #[test]
    fn scroll_moves_dot_but_not_visible_image() {
        let mut carousel = CarouselState::new(3);
        carousel.show(0);
        assert_eq!(carousel.sync_from_scroll(620.0, 300.0), Some(2));
        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.visible(), 0);
    }

    #[test]
    fn scroll_page_rounds_and_clamps() {
        assert_eq!(scroll_page(149.0, 300.0, 3), 0);
        assert_eq!(scroll_page(150.0, 300.0, 3), 1);
        assert_eq!(scroll_page(5000.0, 300.0, 3), 2);
        assert_eq!(scroll_page(-40.0, 300.0, 3), 0);
        assert_eq!(scroll_page(300.0, 0.0, 3), 0);
    }
}
