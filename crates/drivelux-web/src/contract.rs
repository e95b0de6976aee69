#![forbid(unsafe_code)]

//! DOM contract and frontend configuration.
//!
//! The selectors default to the production markup. A host may override any
//! of them (and the core [`SiteConfig`]) by passing a JSON-compatible object
//! at mount:
//!
//! ```json
//! { "site": { "whatsapp_number": "60198765432" },
//!   "dom": { "faq_question": ".faq button" },
//!   "log_level": "debug" }
//! ```

use core::str::FromStr;

use drivelux_core::event::SliderId;
use drivelux_core::{SiteConfig, SiteError, SiteResult};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Selectors of one dot-indicator slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SliderSelectors {
    /// The horizontally scrolling container.
    pub slider: String,
    /// Cards inside the container, queried relative to it.
    pub card: String,
    /// Dot buttons, queried document-wide.
    pub dots: String,
}

impl SliderSelectors {
    fn named(prefix: &str, card: &str) -> Self {
        Self {
            slider: format!(".{prefix}-slider"),
            card: format!(".{card}"),
            dots: format!(".{prefix}-dots button"),
        }
    }
}

/// Element ids and selectors the frontend binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DomContract {
    pub nav_toggle: String,
    pub nav_panel: String,
    pub menu_icon: String,
    pub close_icon: String,
    /// Links inside the panel; each closes it.
    pub nav_links: String,
    /// Question buttons; the answer is the next element sibling.
    pub faq_question: String,
    pub vehicle_card: String,
    /// Image strip of a card, queried relative to the card.
    pub vehicle_strip: String,
    pub vehicle_image: String,
    pub vehicle_dot: String,
    pub vehicle_prev: String,
    pub vehicle_next: String,
    pub lightbox: String,
    pub lightbox_image: String,
    pub lightbox_close: String,
    pub lightbox_prev: String,
    pub lightbox_next: String,
    pub reasons: SliderSelectors,
    pub booking: SliderSelectors,
    /// Free-text `DD/MM/YYYY` inputs.
    pub date_text: String,
    /// Native date/time inputs that open the platform picker on click.
    pub picker: String,
    pub pickup_date: String,
    pub return_date: String,
    pub booking_form: String,
}

impl Default for DomContract {
    fn default() -> Self {
        Self {
            nav_toggle: "#navToggle".into(),
            nav_panel: "#navMobile".into(),
            menu_icon: "#menuIcon".into(),
            close_icon: "#closeIcon".into(),
            nav_links: "#navMobile a".into(),
            faq_question: ".faq-question".into(),
            vehicle_card: ".vehicle-card".into(),
            vehicle_strip: ".vehicle-image-inner".into(),
            vehicle_image: ".vehicle-image-inner img".into(),
            vehicle_dot: ".vehicle-dot".into(),
            vehicle_prev: ".vehicle-nav-prev".into(),
            vehicle_next: ".vehicle-nav-next".into(),
            lightbox: "#lightbox".into(),
            lightbox_image: "#lightboxImg".into(),
            lightbox_close: "#lightboxClose".into(),
            lightbox_prev: "#lightboxPrev".into(),
            lightbox_next: "#lightboxNext".into(),
            reasons: SliderSelectors::named("reasons", "reason-card"),
            booking: SliderSelectors::named("booking", "booking-card"),
            date_text: ".date-input".into(),
            picker: "input[type=\"date\"], input[type=\"time\"]".into(),
            pickup_date: "#pickupDate".into(),
            return_date: "#returnDate".into(),
            booking_form: "#bookingForm".into(),
        }
    }
}

impl DomContract {
    #[must_use]
    pub fn slider(&self, id: SliderId) -> &SliderSelectors {
        match id {
            SliderId::Reasons => &self.reasons,
            SliderId::Booking => &self.booking,
        }
    }
}

/// Everything a host can pass at mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebConfig {
    pub site: SiteConfig,
    pub dom: DomContract,
    /// Most verbose level forwarded to the browser console.
    pub log_level: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            dom: DomContract::default(),
            log_level: "info".into(),
        }
    }
}

impl WebConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.site.validate()?;
        config.max_level()?;
        Ok(config)
    }

    /// Parsed `log_level`.
    pub fn max_level(&self) -> SiteResult<Level> {
        Level::from_str(self.log_level.trim()).map_err(|_| SiteError::InvalidConfig {
            field: "log_level",
            reason: "expected one of trace, debug, info, warn, error",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slider_defaults_follow_markup_naming() {
        let dom = DomContract::default();
        assert_eq!(
            dom.slider(SliderId::Reasons),
            &SliderSelectors {
                slider: ".reasons-slider".into(),
                card: ".reason-card".into(),
                dots: ".reasons-dots button".into(),
            }
        );
        assert_eq!(dom.slider(SliderId::Booking).card, ".booking-card");
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(WebConfig::from_json_str("{}").unwrap(), WebConfig::default());
        assert_eq!(WebConfig::default().max_level().unwrap(), Level::INFO);
    }

    #[test]
    fn nested_overrides_apply() {
        let config = WebConfig::from_json_str(
            r#"{"site":{"whatsapp_number":"60198765432"},
                "dom":{"faq_question":".faq button"},
                "log_level":"debug"}"#,
        )
        .unwrap();
        assert_eq!(config.site.whatsapp_number, "60198765432");
        assert_eq!(config.dom.faq_question, ".faq button");
        assert_eq!(config.dom.nav_toggle, "#navToggle");
        assert_eq!(config.max_level().unwrap(), Level::DEBUG);
    }

    #[test]
    fn invalid_site_values_are_rejected() {
        let err = WebConfig::from_json_str(r#"{"site":{"whatsapp_number":""}}"#).unwrap_err();
        assert!(matches!(
            err,
            SiteError::InvalidConfig {
                field: "whatsapp_number",
                ..
            }
        ));
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let err = WebConfig::from_json_str(r#"{"log_level":"loud"}"#).unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }
}
