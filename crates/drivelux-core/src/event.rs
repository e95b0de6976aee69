#![forbid(unsafe_code)]

//! Canonical input vocabulary shared by the controller and the web host.

/// Keys the controller reacts to.
///
/// Everything else is carried as [`Key::Other`] so traces still show what was
/// pressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Backspace,
    Other(Box<str>),
}

impl Key {
    /// Normalize a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Backspace" => Self::Backspace,
            other => Self::Other(other.into()),
        }
    }

    /// DOM name of the key.
    #[must_use]
    pub fn as_dom_str(&self) -> &str {
        match self {
            Self::Escape => "Escape",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Backspace => "Backspace",
            Self::Other(key) => key,
        }
    }
}

/// Which slider instance a message targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderId {
    Reasons,
    Booking,
}

impl SliderId {
    pub const ALL: [Self; 2] = [Self::Reasons, Self::Booking];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reasons => "reasons",
            Self::Booking => "booking",
        }
    }
}

/// Native date/time inputs of the booking form that carry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Pickup,
    Return,
}

impl DateField {
    /// Form field name of the input.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Pickup => "pickupDate",
            Self::Return => "returnDate",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_normalize() {
        assert_eq!(Key::from_dom("Escape"), Key::Escape);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("ArrowRight"), Key::ArrowRight);
        assert_eq!(Key::from_dom("Left"), Key::ArrowLeft);
        assert_eq!(Key::from_dom("Backspace"), Key::Backspace);
    }

    #[test]
    fn unknown_keys_keep_their_name() {
        let key = Key::from_dom("Enter");
        assert_eq!(key, Key::Other("Enter".into()));
        assert_eq!(key.as_dom_str(), "Enter");
    }
}
