//! End-to-end operator scenarios over the sample data set.

use sentinel_shared::action::{report_detail_actions, Action};
use sentinel_shared::dispatcher::{DispatchOptions, Dispatcher};
use sentinel_shared::render::{render, render_detail, render_reports};
use sentinel_shared::seed;
use sentinel_shared::selection::{CloseCause, ModalState, SelectionController};
use sentinel_shared::services::SimulatedServices;
use sentinel_shared::{EntityKind, EntityRef, EntityStore};

fn console() -> (Dispatcher<SimulatedServices>, EntityStore, SelectionController) {
    (
        Dispatcher::new(SimulatedServices::new(), DispatchOptions::default()),
        EntityStore::from_seed(seed::sample_data()),
        SelectionController::new(),
    )
}

#[test]
fn test_verify_pending_report() {
    let (mut dispatcher, mut store, mut selection) = console();
    assert_eq!(
        store.report("CR002").unwrap().verification.to_string(),
        "Pending Verification"
    );

    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::VerifyReport("CR002".to_string()),
    );
    assert!(outcome.is_ok());
    assert_eq!(
        store.report("CR002").unwrap().verification.to_string(),
        "Verified via Google Lens"
    );

    let nodes = render_reports(store.reports());
    let card = nodes
        .iter()
        .find(|n| n.key.as_ref().map(|k| k.id.as_str()) == Some("CR002"))
        .unwrap();
    assert!(!card
        .actions
        .iter()
        .any(|a| matches!(a, Action::VerifyReport(_))));
}

#[test]
fn test_verified_report_offers_create_alert() {
    let (mut dispatcher, mut store, mut selection) = console();
    let report = store.report("CR001").unwrap();
    assert_eq!(
        report_detail_actions(report),
        vec![Action::CreateAlert("CR001".to_string())]
    );

    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ApproveReport("CR001".to_string()),
    );
    assert_eq!(outcome.error.unwrap().code(), "action_unavailable");
    assert_eq!(
        store.report("CR001").unwrap().verification.to_string(),
        "Verified via Google Lens"
    );
}

#[test]
fn test_modal_close_then_open_team() {
    let (mut dispatcher, mut store, mut selection) = console();
    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ViewAlert("ALT001".to_string()),
    );
    assert_eq!(
        selection.selected(),
        Some(&EntityRef::new(EntityKind::Alert, "ALT001"))
    );

    selection.close(CloseCause::Explicit);
    assert_eq!(selection.state(), &ModalState::Closed);
    assert!(selection.selected().is_none());

    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ViewTeam("RT002".to_string()),
    );
    assert!(outcome.is_ok());
    assert_eq!(
        selection.selected(),
        Some(&EntityRef::new(EntityKind::Team, "RT002"))
    );
}

#[test]
fn test_action_closes_modal() {
    let (mut dispatcher, mut store, mut selection) = console();
    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ViewTeam("RT001".to_string()),
    );
    assert!(selection.is_open());

    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::TrackTeam("RT001".to_string()),
    );
    assert!(!selection.is_open());
}

#[test]
fn test_render_idempotent() {
    let (mut dispatcher, mut store, mut selection) = console();
    for kind in [
        EntityKind::Alert,
        EntityKind::Report,
        EntityKind::Team,
        EntityKind::Guideline,
    ] {
        let snapshot = store.get_all(kind);
        assert_eq!(render(kind, &snapshot), render(kind, &snapshot));
    }

    let before = render(EntityKind::Report, &store.get_all(EntityKind::Report));
    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::RejectReport("CR002".to_string()),
    );
    let after = render(EntityKind::Report, &store.get_all(EntityKind::Report));
    assert_ne!(before, after);
    assert_eq!(
        after,
        render(EntityKind::Report, &store.get_all(EntityKind::Report))
    );
}

#[test]
fn test_detail_reflects_mutation() {
    let (mut dispatcher, mut store, mut selection) = console();
    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::DeployResponse("ALT002".to_string()),
    );
    let team = store.get_by_id(EntityKind::Team, "RT003").unwrap();
    let panel = render_detail(&team);
    assert_eq!(panel.title, "Medical Team - Deployed");
    assert!(panel
        .rows
        .contains(&("Destination".to_string(), "Delhi NCR".to_string())));
}
