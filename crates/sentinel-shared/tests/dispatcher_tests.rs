//! Tests for dispatcher.rs against a scripted capability backend.

use sentinel_shared::action::{Action, BulletinKind};
use sentinel_shared::dispatcher::{DispatchOptions, Dispatcher, NoticeLevel};
use sentinel_shared::seed;
use sentinel_shared::selection::SelectionController;
use sentinel_shared::services::{
    Ack, ChannelRef, MapSessionRef, ResponseServices, VerificationResult,
};
use sentinel_shared::team::TeamStatus;
use sentinel_shared::{EntityKind, EntityRef, EntityStore, Result, SentinelError};

/// Records calls; fails everything while `down` is set
#[derive(Default)]
struct ScriptedServices {
    down: bool,
    reject_photos: bool,
    calls: Vec<String>,
}

impl ScriptedServices {
    fn record(&mut self, call: &str, target: &str) -> Result<()> {
        self.calls.push(format!("{}:{}", call, target));
        if self.down {
            Err(SentinelError::unavailable(call, "connection refused"))
        } else {
            Ok(())
        }
    }
}

impl ResponseServices for ScriptedServices {
    fn deploy_response(&mut self, alert_id: &str) -> Result<Ack> {
        self.record("deploy", alert_id)?;
        Ok(Ack::new("dispatched"))
    }

    fn broadcast(&mut self, alert_id: &str) -> Result<Ack> {
        self.record("broadcast", alert_id)?;
        Ok(Ack::new("broadcast sent"))
    }

    fn track_team(&mut self, team_id: &str) -> Result<MapSessionRef> {
        self.record("track", team_id)?;
        Ok(MapSessionRef {
            session_id: "session-1".to_string(),
            message: "tracking".to_string(),
        })
    }

    fn contact_team(&mut self, team_id: &str) -> Result<ChannelRef> {
        self.record("contact", team_id)?;
        Ok(ChannelRef {
            channel: "radio/1".to_string(),
            message: "on channel".to_string(),
        })
    }

    fn verify_report(&mut self, report_id: &str) -> Result<VerificationResult> {
        self.record("verify", report_id)?;
        Ok(VerificationResult {
            authentic: !self.reject_photos,
            qualifier: if self.reject_photos {
                "Fake Photo Detected".to_string()
            } else {
                "via Google Lens".to_string()
            },
        })
    }

    fn bulletin(&mut self, kind: BulletinKind) -> Result<Ack> {
        self.record("bulletin", kind.slug())?;
        Ok(Ack::new(kind.label()))
    }
}

fn setup(services: ScriptedServices) -> (Dispatcher<ScriptedServices>, EntityStore, SelectionController) {
    (
        Dispatcher::new(services, DispatchOptions::default()),
        EntityStore::from_seed(seed::sample_data()),
        SelectionController::new(),
    )
}

#[test]
fn test_service_unavailable_leaves_state() {
    let services = ScriptedServices {
        down: true,
        ..Default::default()
    };
    let (mut dispatcher, mut store, mut selection) = setup(services);
    dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ViewAlert("ALT001".to_string()),
    );
    let revision = store.revision();

    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::DeployResponse("ALT001".to_string()),
    );

    assert!(matches!(
        outcome.error,
        Some(SentinelError::ServiceUnavailable { .. })
    ));
    assert_eq!(outcome.notice.level, NoticeLevel::Error);
    assert_eq!(store.revision(), revision);
    assert_eq!(store.team("RT003").unwrap().status, TeamStatus::Ready);
    assert!(!selection.is_open());
}

#[test]
fn test_verify_unavailable_keeps_pending() {
    let services = ScriptedServices {
        down: true,
        ..Default::default()
    };
    let (mut dispatcher, mut store, mut selection) = setup(services);
    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::VerifyReport("CR002".to_string()),
    );
    assert!(!outcome.is_ok());
    assert!(store.report("CR002").unwrap().verification.is_pending());
}

#[test]
fn test_verification_can_reject() {
    let services = ScriptedServices {
        reject_photos: true,
        ..Default::default()
    };
    let (mut dispatcher, mut store, mut selection) = setup(services);
    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::VerifyReport("CR002".to_string()),
    );
    assert!(outcome.is_ok());
    assert_eq!(
        store.report("CR002").unwrap().verification.to_string(),
        "Rejected - Fake Photo Detected"
    );
    assert_eq!(
        outcome.changed,
        vec![EntityRef::new(EntityKind::Report, "CR002")]
    );
}

#[test]
fn test_missing_target_skips_service() {
    let (mut dispatcher, mut store, mut selection) = setup(ScriptedServices::default());
    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::ContactTeam("RT900".to_string()),
    );
    assert!(matches!(outcome.error, Some(SentinelError::NotFound { .. })));
    assert!(dispatcher.services().calls.is_empty());
}

#[test]
fn test_verify_already_verified_skips_service() {
    let (mut dispatcher, mut store, mut selection) = setup(ScriptedServices::default());
    let outcome = dispatcher.dispatch(
        &mut store,
        &mut selection,
        Action::VerifyReport("CR001".to_string()),
    );
    assert_eq!(outcome.error.unwrap().code(), "action_unavailable");
    assert!(dispatcher.services().calls.is_empty());
}

#[test]
fn test_delegated_calls_reach_backend() {
    let (mut dispatcher, mut store, mut selection) = setup(ScriptedServices::default());
    for action in [
        Action::BroadcastAlert("ALT002".to_string()),
        Action::TrackTeam("RT001".to_string()),
        Action::ContactTeam("RT003".to_string()),
        Action::Bulletin(BulletinKind::SendSos),
    ] {
        let outcome = dispatcher.dispatch(&mut store, &mut selection, action);
        assert!(outcome.is_ok());
        assert_eq!(outcome.notice.level, NoticeLevel::Info);
    }
    assert_eq!(
        dispatcher.services().calls,
        vec![
            "broadcast:ALT002",
            "track:RT001",
            "contact:RT003",
            "bulletin:send-sos"
        ]
    );
}
