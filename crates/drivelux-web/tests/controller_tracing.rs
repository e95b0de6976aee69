#![forbid(unsafe_code)]

//! Controller events as they reach the browser console.
//!
//! Drives the core simulator under a `BrowserConsoleLayer` with a capture
//! sink, so the formatted lines are exactly what devtools would show.

use drivelux_core::booking::BookingField;
use drivelux_core::simulator::SiteSimulator;
use drivelux_core::{Msg, PageLayout};
use drivelux_web::logging::{BrowserConsoleLayer, CaptureSink, LogConfig};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn layout() -> PageLayout {
    PageLayout {
        faq_count: 2,
        cards: vec![vec!["/a0.jpg".into(), "/a1.jpg".into()]],
        reasons_dots: None,
        booking_dots: None,
    }
}

fn run(config: LogConfig, f: impl FnOnce(&mut SiteSimulator)) -> Vec<String> {
    let sink = CaptureSink::default();
    let layer = BrowserConsoleLayer::with_config(sink.clone(), config);
    let subscriber = tracing_subscriber::registry().with(layer);
    let mut sim = SiteSimulator::new(layout());
    tracing::subscriber::with_default(subscriber, || f(&mut sim));
    sink.lines()
}

#[test]
fn debug_level_shows_state_transitions() {
    let lines = run(LogConfig::quiet_time().max_level(Level::DEBUG), |sim| {
        sim.init();
        sim.send(Msg::NavToggled);
    });
    assert_eq!(
        lines,
        vec![
            "DEBUG drivelux::date: date bounds initialized today=2024-04-20".to_string(),
            "DEBUG drivelux::nav: nav toggled open=true".to_string(),
        ]
    );
}

#[test]
fn info_level_only_keeps_warnings() {
    let lines = run(LogConfig::quiet_time(), |sim| {
        sim.init();
        sim.send(Msg::NavToggled);
        sim.send(Msg::FaqClicked(9));
        sim.send(Msg::FaqClicked(1));
    });
    assert_eq!(
        lines,
        vec!["WARN  drivelux::faq: click on unknown question ignored index=9".to_string()]
    );
}

#[test]
fn booking_submission_logs_url_length() {
    let mut url_len = 0;
    let lines = run(LogConfig::quiet_time().max_level(Level::DEBUG), |sim| {
        sim.edit(BookingField::Name, "Alice");
        sim.send(Msg::BookingSubmitted);
        url_len = sim.opened_urls()[0].url.len();
    });
    assert_eq!(
        lines.last().map(String::as_str),
        Some(format!("DEBUG drivelux::booking: booking submitted url_len={url_len}").as_str())
    );
}
