//! Frame rendering against ratatui's TestBackend.

use ratatui::backend::TestBackend;
use ratatui::Terminal;
use sentinel_shared::seed;
use sentinel_shared::services::SimulatedServices;
use sentinelctl::app::{App, Intent, Section};
use sentinelctl::config::SentinelConfig;
use sentinelctl::tui::draw_ui;

fn console() -> App<SimulatedServices> {
    App::new(
        &SentinelConfig::default(),
        seed::sample_data(),
        SimulatedServices::new(),
    )
}

/// Frame text, one string per row
fn draw(app: &App<SimulatedServices>, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| draw_ui(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_dashboard_frame() {
    let rows = draw(&console(), 120, 40);
    assert!(contains(&rows, "SENTINEL Disaster Monitoring"));
    assert!(contains(&rows, "1 Dashboard"));
    assert!(contains(&rows, "Risk Distribution"));
    assert!(contains(&rows, "Quick Actions / SOS"));
    assert!(contains(&rows, "Live Activity Feed"));
}

#[test]
fn test_alert_cards_listed() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Alerts));
    let rows = draw(&app, 120, 40);
    assert!(contains(&rows, "Alerts (3)"));
    assert!(contains(&rows, "Flood [Critical]"));
    assert!(contains(&rows, "Earthquake [High]"));
}

#[test]
fn test_modal_drawn_over_body() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Teams));
    app.handle(Intent::Activate);
    let rows = draw(&app, 120, 40);
    assert!(contains(&rows, "Fire Brigade - Deployed"));
    assert!(contains(&rows, "[1] Track on Map"));
    assert!(contains(&rows, "[2] Contact Team"));
}

#[test]
fn test_feed_entries_visible_after_tick() {
    let mut app = console();
    app.on_feed_tick();
    let title = app.feed().iter().next().unwrap().title.clone();
    let rows = draw(&app, 120, 40);
    assert!(contains(&rows, &title));
}

#[test]
fn test_narrow_terminal_hides_feed() {
    let rows = draw(&console(), 80, 24);
    assert!(!contains(&rows, "Live Activity Feed"));
}

#[test]
fn test_tiny_terminal_draws() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Guidelines));
    let rows = draw(&app, 12, 4);
    assert_eq!(rows.len(), 4);
}
