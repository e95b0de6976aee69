#![forbid(unsafe_code)]

//! Horizontally scrolling card slider with dot indicators.
//!
//! The active dot follows the nearest-center heuristic: the card whose
//! midpoint is closest to the viewport's midpoint wins, first one on ties.
//! Dot clicks never set the active index directly; they request a scroll and
//! the scroll events that follow re-sync the dots.

/// Horizontal extent of one card, relative to the slider's scroll origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardExtent {
    pub left: f64,
    pub width: f64,
}

impl CardExtent {
    #[must_use]
    pub const fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Layout measurements sampled from the slider at event time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderMetrics {
    pub scroll_left: f64,
    pub viewport_width: f64,
    pub cards: Vec<CardExtent>,
}

impl SliderMetrics {
    #[must_use]
    pub fn viewport_center(&self) -> f64 {
        self.scroll_left + self.viewport_width / 2.0
    }
}

/// Index of the card nearest the viewport center (0 when there are none).
#[must_use]
pub fn nearest_center(metrics: &SliderMetrics) -> usize {
    let center = metrics.viewport_center();
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, card) in metrics.cards.iter().enumerate() {
        let dist = (card.center() - center).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

/// Scroll offset that centers `card` in a viewport `viewport_width` wide.
#[must_use]
pub fn centered_offset(card: CardExtent, viewport_width: f64) -> f64 {
    card.left - (viewport_width - card.width) / 2.0
}

/// Active dot of one slider instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderState {
    active: usize,
    dot_count: usize,
}

impl SliderState {
    #[must_use]
    pub const fn new(dot_count: usize) -> Self {
        Self {
            active: 0,
            dot_count,
        }
    }

    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    #[must_use]
    pub const fn dot_count(&self) -> usize {
        self.dot_count
    }

    /// Recompute the active dot from a scroll sample.
    pub fn on_scroll(&mut self, metrics: &SliderMetrics) -> usize {
        self.active = nearest_center(metrics);
        self.active
    }

    /// Offset to scroll to for a click on dot `dot`, if its card exists.
    #[must_use]
    pub fn target_for_dot(&self, dot: usize, metrics: &SliderMetrics) -> Option<f64> {
        let card = metrics.cards.get(dot)?;
        Some(centered_offset(*card, metrics.viewport_width))
    }
}
