//! Console flow tests: intents in, store and view state out.

use sentinel_shared::dispatcher::NoticeLevel;
use sentinel_shared::report::VerificationState;
use sentinel_shared::selection::CloseCause;
use sentinel_shared::seed;
use sentinel_shared::services::SimulatedServices;
use sentinel_shared::team::TeamStatus;
use sentinel_shared::{EntityKind, EntityRef};
use sentinelctl::app::{App, Intent, Section};
use sentinelctl::config::SentinelConfig;

fn console() -> App<SimulatedServices> {
    let mut config = SentinelConfig::default();
    config.feed.seed = Some(7);
    App::new(&config, seed::sample_data(), SimulatedServices::new())
}

#[test]
fn test_starts_on_dashboard_with_views_built() {
    let app = console();
    assert_eq!(app.section(), Section::Dashboard);
    assert_eq!(app.nodes(Section::Alerts).len(), 3);
    assert_eq!(app.nodes(Section::Reports).len(), 3);
    assert_eq!(app.nodes(Section::Teams).len(), 3);
    assert_eq!(app.render_count(), 3);
    assert!(app.feed().is_empty());
    assert!(!app.selection().is_open());
}

#[test]
fn test_inline_verify_refreshes_only_reports() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Reports));
    app.handle(Intent::CursorDown);
    app.handle(Intent::Verify);

    let report = app.store().report("CR002").unwrap();
    assert_eq!(report.verification.state, VerificationState::Verified);
    assert_eq!(app.render_count(), 4);

    let card = &app.nodes(Section::Reports)[1];
    assert_eq!(card.badge.as_ref().unwrap().text, "Verified via Google Lens");
    assert_eq!(card.actions.len(), 1);

    let notice = app.latest_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Report CR002: Verified via Google Lens");
}

#[test]
fn test_verify_on_settled_report_is_ignored() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Reports));
    app.handle(Intent::Verify);
    assert_eq!(app.render_count(), 3);
    assert!(app.latest_notice().is_none());
}

#[test]
fn test_open_alert_and_deploy_from_modal() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Alerts));
    app.handle(Intent::Activate);

    assert_eq!(
        app.selection().selected(),
        Some(&EntityRef::new(EntityKind::Alert, "ALT001"))
    );
    let panel = app.detail().unwrap();
    assert_eq!(panel.title, "Flood Alert - Critical");

    app.handle(Intent::ModalAction(0));
    assert!(!app.selection().is_open());

    let team = app.store().team("RT003").unwrap();
    assert_eq!(team.status, TeamStatus::Deployed);
    assert_eq!(team.destination, "Mumbai, Maharashtra");
    assert_eq!(
        app.nodes(Section::Teams)[2].badge.as_ref().unwrap().text,
        "Deployed"
    );
}

#[test]
fn test_modal_closes_on_cancel_and_outside_click() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Teams));
    app.handle(Intent::Activate);
    assert!(app.selection().is_open());
    app.handle(Intent::Close(CloseCause::Cancel));
    assert!(app.selection().selected().is_none());

    app.handle(Intent::Activate);
    app.handle(Intent::Close(CloseCause::OutsideClick));
    assert!(!app.selection().is_open());
    assert!(app.detail().is_none());
}

#[test]
fn test_modal_action_out_of_range_does_nothing() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Teams));
    app.handle(Intent::Activate);
    app.handle(Intent::ModalAction(5));
    assert!(app.selection().is_open());
}

#[test]
fn test_quick_action_posts_notice() {
    let mut app = console();
    app.handle(Intent::CursorDown);
    app.handle(Intent::CursorDown);
    app.handle(Intent::Activate);

    let notice = app.latest_notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Info);
    assert!(!notice.message.is_empty());
    assert_eq!(app.render_count(), 3);
}

#[test]
fn test_cursor_stays_in_bounds() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Alerts));
    for _ in 0..10 {
        app.handle(Intent::CursorDown);
    }
    assert_eq!(app.cursor(), 2);
    for _ in 0..10 {
        app.handle(Intent::CursorUp);
    }
    assert_eq!(app.cursor(), 0);
}

#[test]
fn test_feed_ticks_keep_capacity() {
    let mut app = console();
    for _ in 0..7 {
        app.on_feed_tick();
    }
    assert_eq!(app.feed().len(), 5);
}

#[test]
fn test_indicator_toggles() {
    let mut app = console();
    let before = app.indicator().is_lit();
    app.on_indicator_tick();
    assert_ne!(app.indicator().is_lit(), before);
}

#[test]
fn test_filter_only_records_criterion() {
    let mut app = console();
    app.handle(Intent::GoTo(Section::Alerts));
    app.handle(Intent::CycleFilter);
    assert_eq!(app.filter(), "critical");
    assert_eq!(app.latest_notice().unwrap().message, "Filter: critical");
    assert_eq!(app.nodes(Section::Alerts).len(), 3);
}

#[test]
fn test_guideline_tabs_wrap() {
    let mut app = console();
    assert_eq!(app.current_guidelines().unwrap().disaster_type, "flood");
    app.handle(Intent::NextTab);
    assert_eq!(app.section(), Section::Guidelines);
    assert_eq!(app.current_guidelines().unwrap().disaster_type, "earthquake");
    app.handle(Intent::PrevTab);
    app.handle(Intent::PrevTab);
    assert_eq!(app.current_guidelines().unwrap().disaster_type, "fire");
}

#[test]
fn test_offline_deploy_reports_error() {
    let config = SentinelConfig::default();
    let mut app = App::new(&config, seed::sample_data(), SimulatedServices::offline());
    app.handle(Intent::GoTo(Section::Alerts));
    app.handle(Intent::Activate);
    app.handle(Intent::ModalAction(0));

    assert_eq!(app.latest_notice().unwrap().level, NoticeLevel::Error);
    assert_eq!(app.store().team("RT003").unwrap().status, TeamStatus::Ready);
    assert_eq!(app.render_count(), 3);
    assert!(!app.selection().is_open());
}

#[test]
fn test_quit() {
    let mut app = console();
    app.handle(Intent::Quit);
    assert!(app.should_quit());
}

#[test]
fn test_start_section_from_config() {
    let config = SentinelConfig::from_toml("[ui]\nstart_section = \"teams\"\ndefault_guideline = \"fire\"\n").unwrap();
    let app = App::new(&config, seed::sample_data(), SimulatedServices::new());
    assert_eq!(app.section(), Section::Teams);
    assert_eq!(app.guideline_tab(), 2);
}
