#![forbid(unsafe_code)]

//! Mobile navigation panel.

/// Open/closed state of the mobile panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    open: bool,
}

impl NavState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel; returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Visibility of the (menu, close) icon pair. Exactly one is shown.
    #[must_use]
    pub const fn icons(&self) -> (bool, bool) {
        (!self.open, self.open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_swaps_icons() {
        let mut nav = NavState::default();
        assert_eq!(nav.icons(), (true, false));
        assert!(nav.toggle());
        assert_eq!(nav.icons(), (false, true));
        assert!(!nav.toggle());
        assert_eq!(nav.icons(), (true, false));
    }

    #[test]
    fn close_is_idempotent() {
        let mut nav = NavState::default();
        nav.toggle();
        nav.close();
        nav.close();
        assert!(!nav.is_open());
        assert_eq!(nav.icons(), (true, false));
    }
}
