#![forbid(unsafe_code)]

//! Viewport width predicate.
//!
//! The controller asks the probe once at the top of every message, so
//! responsive branching follows live resizes and rotation without caching.

use std::cell::Cell;
use std::rc::Rc;

/// Answers whether the viewport is currently narrow.
pub trait ViewportProbe {
    fn is_narrow(&self) -> bool;
}

/// Viewport mode as observed for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportMode {
    /// Button-driven carousel navigation.
    Wide,
    /// Native horizontal scroll drives the carousel.
    Narrow,
}

impl ViewportMode {
    #[must_use]
    pub fn sample(probe: &dyn ViewportProbe) -> Self {
        if probe.is_narrow() {
            Self::Narrow
        } else {
            Self::Wide
        }
    }
}

/// Probe with a host-controlled answer.
///
/// Clones share the flag, so a test can keep a handle and flip the mode after
/// the controller took ownership of its copy.
#[derive(Debug, Clone, Default)]
pub struct FixedViewport {
    narrow: Rc<Cell<bool>>,
}

impl FixedViewport {
    #[must_use]
    pub fn wide() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn narrow() -> Self {
        let probe = Self::default();
        probe.set_narrow(true);
        probe
    }

    pub fn set_narrow(&self, narrow: bool) {
        self.narrow.set(narrow);
    }
}

impl ViewportProbe for FixedViewport {
    fn is_narrow(&self) -> bool {
        self.narrow.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_probe_clones_share_state() {
        let probe = FixedViewport::wide();
        let handle = probe.clone();
        assert_eq!(ViewportMode::sample(&probe), ViewportMode::Wide);
        handle.set_narrow(true);
        assert_eq!(ViewportMode::sample(&probe), ViewportMode::Narrow);
    }
}
