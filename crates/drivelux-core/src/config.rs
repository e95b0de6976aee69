#![forbid(unsafe_code)]

//! Site configuration.
//!
//! Every field has a default so an empty JSON object (or no config at all)
//! yields the production setup.

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

/// Destination contact used when no config overrides it.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "60123456789";
/// Widest viewport (CSS px) still treated as narrow.
pub const DEFAULT_NARROW_BREAKPOINT_PX: u32 = 639;
/// Base of the outbound messaging deep link.
pub const DEFAULT_WA_BASE_URL: &str = "https://wa.me";
/// First line of the booking message.
pub const DEFAULT_GREETING: &str = "Hello DriveLux! I would like to book a car.";

/// Tunables for the controller and the booking message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Destination contact identifier (digits, international format).
    pub whatsapp_number: String,
    /// Viewports at or below this width use narrow (scroll-driven) behavior.
    pub narrow_breakpoint_px: u32,
    /// Base URL of the messaging service, without trailing slash.
    pub wa_base_url: String,
    /// Opening line of the booking message.
    pub greeting: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            narrow_breakpoint_px: DEFAULT_NARROW_BREAKPOINT_PX,
            wa_base_url: DEFAULT_WA_BASE_URL.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> SiteResult<()> {
        let number = self.whatsapp_number.trim();
        if number.is_empty() {
            return Err(SiteError::InvalidConfig {
                field: "whatsapp_number",
                reason: "must not be empty",
            });
        }
        if !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(SiteError::InvalidConfig {
                field: "whatsapp_number",
                reason: "must contain digits only",
            });
        }
        if self.narrow_breakpoint_px == 0 {
            return Err(SiteError::InvalidConfig {
                field: "narrow_breakpoint_px",
                reason: "must be positive",
            });
        }
        if self.wa_base_url.trim().is_empty() {
            return Err(SiteError::InvalidConfig {
                field: "wa_base_url",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// CSS media query matching narrow viewports.
    #[must_use]
    pub fn narrow_media_query(&self) -> String {
        format!("(max-width: {}px)", self.narrow_breakpoint_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SiteConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.narrow_media_query(), "(max-width: 639px)");
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json_str(r#"{"whatsapp_number":"60198765432"}"#).unwrap();
        assert_eq!(config.whatsapp_number, "60198765432");
        assert_eq!(config.wa_base_url, DEFAULT_WA_BASE_URL);
    }

    #[test]
    fn rejects_non_digit_number() {
        let err = SiteConfig::from_json_str(r#"{"whatsapp_number":"+60 12"}"#).unwrap_err();
        assert!(matches!(
            err,
            SiteError::InvalidConfig {
                field: "whatsapp_number",
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_breakpoint() {
        let err = SiteConfig::from_json_str(r#"{"narrow_breakpoint_px":0}"#).unwrap_err();
        assert!(err.to_string().contains("narrow_breakpoint_px"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            SiteConfig::from_json_str(r#"{"colour":"red"}"#),
            Err(SiteError::Config(_))
        ));
    }
}
