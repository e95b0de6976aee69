#![forbid(unsafe_code)]

//! Tracing layer that writes formatted events to the browser console.
//!
//! `BrowserConsoleLayer` is a `tracing_subscriber::Layer`: each event becomes
//! one `LEVEL target: message k=v` line handed to a [`ConsoleSink`]. On
//! `wasm32` the sink is the devtools console (level mapped to
//! `console.error/warn/info/log/debug`); tests use [`CaptureSink`].
//!
//! ```
//! use drivelux_web::logging::{BrowserConsoleLayer, CaptureSink, LogConfig};
//! use tracing_subscriber::prelude::*;
//!
//! let sink = CaptureSink::default();
//! let layer = BrowserConsoleLayer::with_config(sink.clone(), LogConfig::quiet_time());
//! let subscriber = tracing_subscriber::registry().with(layer);
//! tracing::subscriber::with_default(subscriber, || {
//!     tracing::info!(target: "drivelux::site", "mounted");
//! });
//! assert_eq!(sink.lines(), vec!["INFO  drivelux::site: mounted".to_string()]);
//! ```

use std::fmt::{self, Write as FmtWrite};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

// ============================================================================
// Configuration
// ============================================================================

/// Formatting and filtering of console lines.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Prefix lines with `HH:MM:SS` (UTC). Default: true.
    pub show_time: bool,
    /// Show the tracing target. Default: true.
    pub show_target: bool,
    /// Show structured fields beyond `message`. Default: true.
    pub show_fields: bool,
    /// Most verbose level forwarded. Default: `INFO`.
    pub max_level: Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            show_time: true,
            show_target: true,
            show_fields: true,
            max_level: Level::INFO,
        }
    }
}

impl LogConfig {
    /// Defaults without timestamps, for deterministic output.
    #[must_use]
    pub fn quiet_time() -> Self {
        Self {
            show_time: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn max_level(mut self, level: Level) -> Self {
        self.max_level = level;
        self
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Destination for formatted lines.
pub trait ConsoleSink: Send + Sync + 'static {
    fn write_line(&self, level: Level, line: &str);
}

/// In-memory sink that keeps every line.
#[derive(Debug, Clone, Default)]
pub struct CaptureSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ConsoleSink for CaptureSink {
    fn write_line(&self, _level: Level, line: &str) {
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push(line.to_string());
    }
}

/// The devtools console.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConsole;

#[cfg(target_arch = "wasm32")]
impl ConsoleSink for BrowserConsole {
    fn write_line(&self, level: Level, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            Level::DEBUG => web_sys::console::log_1(&line),
            Level::TRACE => web_sys::console::debug_1(&line),
        }
    }
}

// ============================================================================
// Event Visitor
// ============================================================================

/// Extracts message and structured fields from a tracing event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.fields.push((field.name().to_string(), rendered));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }
}

/// Format level as a fixed-width string.
fn level_str(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARN ",
        Level::INFO => "INFO ",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// `HH:MM:SS` of the wall clock; `web_time` keeps this working on wasm32.
fn timestamp_now() -> String {
    let since_epoch = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = since_epoch.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs % 3600) / 60,
        secs % 60
    )
}

// ============================================================================
// BrowserConsoleLayer
// ============================================================================

/// A `tracing_subscriber::Layer` formatting events into console lines.
pub struct BrowserConsoleLayer<S> {
    sink: S,
    config: LogConfig,
}

impl<S: ConsoleSink> BrowserConsoleLayer<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, LogConfig::default())
    }

    pub fn with_config(sink: S, config: LogConfig) -> Self {
        Self { sink, config }
    }

    fn format_event(&self, event: &Event<'_>) -> String {
        let meta = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = String::new();
        if self.config.show_time {
            let _ = write!(line, "{} ", timestamp_now());
        }
        line.push_str(level_str(*meta.level()));
        if self.config.show_target {
            let _ = write!(line, " {}:", meta.target());
        }
        if let Some(message) = visitor.message {
            let _ = write!(line, " {message}");
        }
        if self.config.show_fields {
            for (name, value) in &visitor.fields {
                let _ = write!(line, " {name}={value}");
            }
        }
        line
    }
}

impl<S, Sub> Layer<Sub> for BrowserConsoleLayer<S>
where
    S: ConsoleSink,
    Sub: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, Sub>) -> bool {
        *metadata.level() <= self.config.max_level
    }

    fn max_level_hint(&self) -> Option<LevelFilter> {
        Some(LevelFilter::from_level(self.config.max_level))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, Sub>) {
        let line = self.format_event(event);
        self.sink.write_line(*event.metadata().level(), &line);
    }
}

/// Install the console layer as the global subscriber.
///
/// A second call is a no-op: the first subscriber stays installed.
#[cfg(target_arch = "wasm32")]
pub fn install(config: LogConfig) {
    use tracing_subscriber::prelude::*;

    let layer = BrowserConsoleLayer::with_config(BrowserConsole, config);
    let subscriber = tracing_subscriber::registry().with(layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::prelude::*;

    fn capture(config: LogConfig, f: impl FnOnce()) -> Vec<String> {
        let sink = CaptureSink::default();
        let layer = BrowserConsoleLayer::with_config(sink.clone(), config);
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, f);
        sink.lines()
    }

    #[test]
    fn formats_level_target_message_and_fields() {
        let lines = capture(LogConfig::quiet_time().max_level(Level::DEBUG), || {
            tracing::debug!(
                target: "drivelux::carousel",
                card = 2,
                mode = "wide",
                "carousel stepped"
            );
        });
        assert_eq!(
            lines,
            vec!["DEBUG drivelux::carousel: carousel stepped card=2 mode=wide".to_string()]
        );
    }

    #[test]
    fn drops_events_above_max_level() {
        let lines = capture(LogConfig::quiet_time(), || {
            tracing::trace!("noisy");
            tracing::debug!("chatty");
            tracing::warn!(target: "drivelux::faq", "kept");
        });
        assert_eq!(lines, vec!["WARN  drivelux::faq: kept".to_string()]);
    }

    #[test]
    fn fields_and_target_can_be_hidden() {
        let config = LogConfig {
            show_time: false,
            show_target: false,
            show_fields: false,
            max_level: Level::INFO,
        };
        let lines = capture(config, || {
            tracing::info!(url_len = 120, "booking submitted");
        });
        assert_eq!(lines, vec!["INFO  booking submitted".to_string()]);
    }

    #[test]
    fn filtered_levels_are_disabled_before_dispatch() {
        let sink = CaptureSink::default();
        let layer = BrowserConsoleLayer::new(sink.clone());
        let subscriber = tracing_subscriber::registry().with(layer);
        let (trace_on, debug_on, info_on) = tracing::subscriber::with_default(subscriber, || {
            (
                tracing::enabled!(Level::TRACE),
                tracing::enabled!(Level::DEBUG),
                tracing::enabled!(Level::INFO),
            )
        });
        assert!(!trace_on);
        assert!(!debug_on);
        assert!(info_on);
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn timestamp_prefix_has_clock_shape() {
        let sink = CaptureSink::default();
        let layer = BrowserConsoleLayer::new(sink.clone());
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("boom");
        });
        let lines = sink.lines();
        let line = &lines[0];
        let (clock, rest) = line.split_at(8);
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
        assert!(rest.starts_with(" ERROR"));
    }
}
