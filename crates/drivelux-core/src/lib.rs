#![forbid(unsafe_code)]

//! Core: host-independent view state for the DriveLux site.
//!
//! Every interactive behavior of the page is modelled as an explicit state
//! value with pure transitions. [`controller::ViewStateController`] owns one
//! state per behavior, turns host messages into state changes plus
//! [`controller::Cmd`] side effects, and exposes a render snapshot through
//! [`controller::ViewStateController::view`]. Rendering never reads state
//! back out of the DOM.

pub mod accordion;
pub mod booking;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod date;
pub mod error;
pub mod event;
pub mod lightbox;
pub mod nav;
pub mod simulator;
pub mod slider;
pub mod viewport;

pub use config::SiteConfig;
pub use controller::{Cmd, Msg, PageLayout, PageView, ViewStateController};
pub use error::{SiteError, SiteResult};
