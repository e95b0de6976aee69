#![forbid(unsafe_code)]

//! Error type shared by the core and the web frontend.

/// Errors raised while configuring or mounting the site controller.
///
/// Interaction handlers never fail: missing optional markup disables the
/// behavior and out-of-range input is ignored.
#[derive(Debug)]
pub enum SiteError {
    /// Configuration JSON could not be parsed.
    Config(serde_json::Error),
    /// Configuration parsed but holds an unusable value.
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// A required element of the DOM contract was not found.
    MissingElement(String),
    /// The host environment lacks something the frontend needs.
    Unsupported(&'static str),
}

impl core::fmt::Display for SiteError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid site config: {err}"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid site config field `{field}`: {reason}")
            }
            Self::MissingElement(selector) => write!(f, "required element not found: {selector}"),
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

/// Convenience alias for results carrying a [`SiteError`].
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_selector() {
        let err = SiteError::MissingElement("#navToggle".into());
        assert_eq!(err.to_string(), "required element not found: #navToggle");
    }

    #[test]
    fn config_error_exposes_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SiteError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid site config:"));
    }
}
