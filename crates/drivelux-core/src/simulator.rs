#![forbid(unsafe_code)]

//! Deterministic page simulator for testing.
//!
//! `SiteSimulator` drives a [`ViewStateController`] without a browser. It
//! executes returned commands against an in-memory model of the inputs the
//! controller writes to, records everything it executed, and keeps a handle
//! on the viewport so tests can flip between wide and narrow mode.
//!
//! # Example
//!
//! ```
//! use drivelux_core::controller::{Msg, PageLayout};
//! use drivelux_core::simulator::SiteSimulator;
//!
//! let mut sim = SiteSimulator::new(PageLayout::default());
//! sim.init();
//! sim.send(Msg::NavToggled);
//! assert!(sim.view().nav_open);
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::booking::BookingField;
use crate::config::SiteConfig;
use crate::controller::{Cmd, InputTarget, Msg, PageLayout, PageView, ViewStateController};
use crate::event::DateField;
use crate::viewport::FixedViewport;

/// A fixed "today" so simulated runs do not depend on the wall clock.
pub const SIMULATED_TODAY: (i32, u32, u32) = (2024, 4, 20);

/// A URL the controller asked the host to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedUrl {
    pub url: String,
    pub target: &'static str,
}

/// Deterministic simulator for [`ViewStateController`].
pub struct SiteSimulator {
    controller: ViewStateController,
    viewport: FixedViewport,
    command_log: Vec<Cmd>,
    values: HashMap<InputTarget, String>,
    date_mins: HashMap<DateField, String>,
    opened: Vec<OpenedUrl>,
    default_prevented: usize,
    pickers_shown: Vec<usize>,
}

impl SiteSimulator {
    /// Simulator with the default config, a wide viewport, and
    /// [`SIMULATED_TODAY`].
    #[must_use]
    pub fn new(layout: PageLayout) -> Self {
        let (y, m, d) = SIMULATED_TODAY;
        let today = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        Self::with_config(SiteConfig::default(), layout, today)
    }

    #[must_use]
    pub fn with_config(config: SiteConfig, layout: PageLayout, today: NaiveDate) -> Self {
        let viewport = FixedViewport::wide();
        let controller =
            ViewStateController::new(config, layout, Box::new(viewport.clone()), today);
        Self {
            controller,
            viewport,
            command_log: Vec::new(),
            values: HashMap::new(),
            date_mins: HashMap::new(),
            opened: Vec::new(),
            default_prevented: 0,
            pickers_shown: Vec::new(),
        }
    }

    /// Run the controller's startup commands.
    pub fn init(&mut self) {
        let cmd = self.controller.init();
        self.execute(cmd);
    }

    /// Dispatch one message and execute what it returns.
    pub fn send(&mut self, msg: Msg) {
        let cmd = self.controller.update(msg);
        self.execute(cmd);
    }

    pub fn send_all(&mut self, msgs: impl IntoIterator<Item = Msg>) {
        for msg in msgs {
            self.send(msg);
        }
    }

    /// Type into a booking field the way the host reports it.
    pub fn edit(&mut self, field: BookingField, value: &str) {
        self.values
            .insert(InputTarget::Field(field), value.to_string());
        self.send(Msg::FieldEdited {
            field,
            value: value.to_string(),
        });
    }

    /// Type into the N-th free-text date field the way the host reports it.
    pub fn type_date_text(&mut self, input: usize, value: &str) {
        self.values
            .insert(InputTarget::DateText(input), value.to_string());
        self.send(Msg::DateTyped {
            input,
            value: value.to_string(),
        });
    }

    pub fn set_narrow(&self, narrow: bool) {
        self.viewport.set_narrow(narrow);
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        self.controller.view()
    }

    #[must_use]
    pub fn controller(&self) -> &ViewStateController {
        &self.controller
    }

    /// Leaf commands executed so far, in order.
    #[must_use]
    pub fn command_log(&self) -> &[Cmd] {
        &self.command_log
    }

    /// Current value of an input as last written by either side.
    #[must_use]
    pub fn value(&self, target: InputTarget) -> &str {
        self.values.get(&target).map_or("", String::as_str)
    }

    #[must_use]
    pub fn date_min(&self, field: DateField) -> Option<&str> {
        self.date_mins.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn opened_urls(&self) -> &[OpenedUrl] {
        &self.opened
    }

    #[must_use]
    pub fn default_prevented(&self) -> usize {
        self.default_prevented
    }

    #[must_use]
    pub fn pickers_shown(&self) -> &[usize] {
        &self.pickers_shown
    }

    fn execute(&mut self, cmd: Cmd) {
        for leaf in cmd.flatten() {
            match &leaf {
                Cmd::None | Cmd::Batch(_) => {}
                Cmd::PreventDefault => self.default_prevented += 1,
                Cmd::ScrollIntoView { .. } | Cmd::ScrollSliderTo { .. } => {}
                Cmd::ShowPicker(input) => self.pickers_shown.push(*input),
                Cmd::SetValue { target, value } => {
                    self.values.insert(*target, value.clone());
                }
                Cmd::SetDateMin { field, min } => {
                    self.date_mins.insert(*field, min.clone());
                }
                Cmd::OpenUrl { url, target } => self.opened.push(OpenedUrl {
                    url: url.clone(),
                    target: *target,
                }),
                Cmd::ResetForm => {
                    self.values
                        .retain(|target, _| !matches!(target, InputTarget::Field(_)));
                }
            }
            self.command_log.push(leaf);
        }
    }
}
