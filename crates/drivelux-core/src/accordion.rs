#![forbid(unsafe_code)]

//! FAQ accordion with at most one open question.

/// Which question, if any, is expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionState {
    count: usize,
    open: Option<usize>,
}

impl AccordionState {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count, open: None }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub const fn open_index(&self) -> Option<usize> {
        self.open
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Handle a click on question `index`.
    ///
    /// Everything collapses first; the clicked question then opens unless it
    /// was the open one. Returns `false` for an index outside the list.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        let was_open = self.is_open(index);
        self.open = None;
        if !was_open {
            self.open = Some(index);
        }
        true
    }

    /// `aria-expanded` value for question `index`.
    #[must_use]
    pub fn aria_expanded(&self, index: usize) -> &'static str {
        if self.is_open(index) { "true" } else { "false" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicking_closed_question_opens_only_it() {
        let mut faq = AccordionState::new(4);
        faq.toggle(1);
        faq.toggle(3);
        assert_eq!(faq.open_index(), Some(3));
        assert_eq!(faq.aria_expanded(1), "false");
        assert_eq!(faq.aria_expanded(3), "true");
    }

    #[test]
    fn clicking_open_question_collapses_all() {
        let mut faq = AccordionState::new(2);
        faq.toggle(0);
        faq.toggle(0);
        assert_eq!(faq.open_index(), None);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut faq = AccordionState::new(2);
        faq.toggle(1);
        assert!(!faq.toggle(7));
        assert_eq!(faq.open_index(), Some(1));
    }
}
