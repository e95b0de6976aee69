#![forbid(unsafe_code)]

//! WASM frontend for the DriveLux site.
//!
//! The crate binds the page's DOM contract to a
//! [`drivelux_core::ViewStateController`]:
//! - DOM events become controller messages,
//! - returned commands are executed against the DOM (scrolls, input values,
//!   the booking link),
//! - the controller's view snapshot is painted back after every event.
//!
//! Configuration parsing and the tracing console layer are host-independent
//! and tested natively; the DOM binding itself only exists on `wasm32`.

pub mod contract;
pub mod logging;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::DriveluxSite;

pub use contract::{DomContract, WebConfig};

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct DriveluxSite;

#[cfg(not(target_arch = "wasm32"))]
impl DriveluxSite {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}
