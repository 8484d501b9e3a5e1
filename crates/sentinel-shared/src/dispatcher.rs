//! Action dispatcher.
//!
//! Routes each [`Action`] to store mutations and capability calls. Failures
//! never propagate past here: they become a notice for the operator and a
//! log line, and the store is left as it was.
//!
//! Every action except the pure "view" ones closes the modal when it
//! finishes, whether it succeeded or not.

use crate::action::Action;
use crate::alert::{Alert, AlertStatus};
use crate::error::{Result, SentinelError};
use crate::report::{Verification, VerificationState};
use crate::selection::{CloseCause, SelectionController};
use crate::services::ResponseServices;
use crate::store::{Entity, EntityKind, EntityRef, EntityState, EntityStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Qualifier recorded when an operator approves a report by hand
pub const OPERATOR_APPROVAL: &str = "by Operator";

/// Qualifier recorded when an operator rejects a report
pub const OPERATOR_REJECTION: &str = "Operator Review";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchOptions {
    /// Promote a report to an alert as soon as it is approved
    #[serde(default)]
    pub auto_alert_on_approve: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Non-blocking message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What a dispatched action did
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub action: Action,
    pub notice: Notice,
    /// Entities created or mutated, in order
    pub changed: Vec<EntityRef>,
    pub error: Option<SentinelError>,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

struct Effect {
    level: NoticeLevel,
    message: String,
    changed: Vec<EntityRef>,
}

impl Effect {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            changed: Vec::new(),
        }
    }

    fn success(message: impl Into<String>, changed: Vec<EntityRef>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            changed,
        }
    }
}

pub struct Dispatcher<S> {
    services: S,
    options: DispatchOptions,
}

impl<S: ResponseServices> Dispatcher<S> {
    pub fn new(services: S, options: DispatchOptions) -> Self {
        Self { services, options }
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut S {
        &mut self.services
    }

    pub fn dispatch(
        &mut self,
        store: &mut EntityStore,
        selection: &mut SelectionController,
        action: Action,
    ) -> Outcome {
        let result = self.route(store, selection, &action);

        if !action.is_view() {
            selection.close(CloseCause::Explicit);
        }

        match result {
            Ok(effect) => {
                info!(%action, changed = effect.changed.len(), "action completed");
                Outcome {
                    action,
                    notice: Notice::new(effect.level, effect.message),
                    changed: effect.changed,
                    error: None,
                }
            }
            Err(err) => {
                warn!(%action, code = err.code(), "action failed: {}", err);
                let level = match err {
                    SentinelError::ServiceUnavailable { .. } => NoticeLevel::Error,
                    _ => NoticeLevel::Warning,
                };
                Outcome {
                    action,
                    notice: Notice::new(level, err.to_string()),
                    changed: Vec::new(),
                    error: Some(err),
                }
            }
        }
    }

    fn route(
        &mut self,
        store: &mut EntityStore,
        selection: &mut SelectionController,
        action: &Action,
    ) -> Result<Effect> {
        match action {
            Action::ViewAlert(id) => view(store, selection, EntityKind::Alert, id),
            Action::ViewReport(id) => view(store, selection, EntityKind::Report, id),
            Action::ViewTeam(id) => view(store, selection, EntityKind::Team, id),
            Action::VerifyReport(id) => self.verify(store, id),
            Action::ApproveReport(id) => self.approve(store, id),
            Action::RejectReport(id) => reject(store, id),
            Action::CreateAlert(id) => create_alert_from_report(store, id),
            Action::DeployResponse(id) => self.deploy(store, id),
            Action::BroadcastAlert(id) => {
                store.alert(id)?;
                let ack = self.services.broadcast(id)?;
                Ok(Effect::info(ack.message))
            }
            Action::TrackTeam(id) => {
                store.team(id)?;
                let session = self.services.track_team(id)?;
                Ok(Effect::info(session.message))
            }
            Action::ContactTeam(id) => {
                store.team(id)?;
                let channel = self.services.contact_team(id)?;
                Ok(Effect::info(channel.message))
            }
            Action::Bulletin(kind) => {
                let ack = self.services.bulletin(*kind)?;
                Ok(Effect::info(ack.message))
            }
        }
    }

    fn verify(&mut self, store: &mut EntityStore, id: &str) -> Result<Effect> {
        require_pending(store, "verify-report", id)?;
        let result = self.services.verify_report(id)?;
        let next = if result.authentic {
            Verification::verified(result.qualifier)
        } else {
            Verification::rejected(result.qualifier)
        };
        let label = next.to_string();
        store.transition(EntityKind::Report, id, EntityState::Report(next))?;
        Ok(Effect::success(
            format!("Report {}: {}", id, label),
            vec![EntityRef::new(EntityKind::Report, id)],
        ))
    }

    fn approve(&mut self, store: &mut EntityStore, id: &str) -> Result<Effect> {
        require_pending(store, "approve-report", id)?;
        if self.options.auto_alert_on_approve {
            require_no_alert(store, id)?;
        }
        store.transition(
            EntityKind::Report,
            id,
            EntityState::Report(Verification::verified(OPERATOR_APPROVAL)),
        )?;
        let mut effect = Effect::success(
            format!("Report {} approved", id),
            vec![EntityRef::new(EntityKind::Report, id)],
        );
        if self.options.auto_alert_on_approve {
            let created = create_alert_from_report(store, id)?;
            effect.message = format!("{}. {}", effect.message, created.message);
            effect.changed.extend(created.changed);
        }
        Ok(effect)
    }

    fn deploy(&mut self, store: &mut EntityStore, alert_id: &str) -> Result<Effect> {
        let destination = store.alert(alert_id)?.location.name.clone();
        let team = store
            .first_available_team()
            .ok_or_else(|| SentinelError::ActionUnavailable {
                action: "deploy-response".to_string(),
                id: alert_id.to_string(),
                reason: "no response team available".to_string(),
            })?;
        let (team_id, team_kind) = (team.id.clone(), team.kind.clone());

        let ack = self.services.deploy_response(alert_id)?;
        store.assign_team(&team_id, &destination)?;
        Ok(Effect::success(
            format!("{} {} en route to {}.", ack.message, team_kind, destination),
            vec![EntityRef::new(EntityKind::Team, team_id)],
        ))
    }
}

fn view(
    store: &EntityStore,
    selection: &mut SelectionController,
    kind: EntityKind,
    id: &str,
) -> Result<Effect> {
    let entity = store.get_by_id(kind, id)?;
    selection.open(entity.entity_ref());
    Ok(Effect::info(String::new()))
}

fn require_pending(store: &EntityStore, action: &str, id: &str) -> Result<()> {
    let report = store.report(id)?;
    if report.verification.is_pending() {
        Ok(())
    } else {
        Err(SentinelError::ActionUnavailable {
            action: action.to_string(),
            id: id.to_string(),
            reason: format!("report is already {}", report.verification),
        })
    }
}

fn reject(store: &mut EntityStore, id: &str) -> Result<Effect> {
    require_pending(store, "reject-report", id)?;
    store.transition(
        EntityKind::Report,
        id,
        EntityState::Report(Verification::rejected(OPERATOR_REJECTION)),
    )?;
    Ok(Effect::success(
        format!("Report {} rejected", id),
        vec![EntityRef::new(EntityKind::Report, id)],
    ))
}

fn alert_source(report_id: &str) -> String {
    format!("Citizen Report {}", report_id)
}

fn require_no_alert(store: &EntityStore, report_id: &str) -> Result<()> {
    let source = alert_source(report_id);
    match store.alerts().iter().find(|a| a.source == source) {
        Some(existing) => Err(SentinelError::ActionUnavailable {
            action: "create-alert".to_string(),
            id: report_id.to_string(),
            reason: format!("alert {} already raised from this report", existing.id),
        }),
        None => Ok(()),
    }
}

/// Promote a verified report to an active alert
fn create_alert_from_report(store: &mut EntityStore, report_id: &str) -> Result<Effect> {
    let report = store.report(report_id)?;
    if report.verification.state != VerificationState::Verified {
        return Err(SentinelError::ActionUnavailable {
            action: "create-alert".to_string(),
            id: report_id.to_string(),
            reason: format!("report is {}", report.verification),
        });
    }

    require_no_alert(store, report_id)?;

    let alert = Alert {
        id: store.next_alert_id(),
        kind: report.kind.clone(),
        severity: report.priority,
        location: report.location.clone(),
        timestamp: report.timestamp,
        source: alert_source(report_id),
        description: report.description.clone(),
        status: AlertStatus::Active,
        affected_population: 0,
    };
    let alert_ref = EntityRef::new(EntityKind::Alert, alert.id.clone());
    let message = format!(
        "Alert {} created from citizen report {}. Emergency services notified.",
        alert.id, report_id
    );
    store.upsert(EntityKind::Alert, Entity::Alert(alert))?;
    Ok(Effect::success(message, vec![alert_ref]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use crate::services::SimulatedServices;

    fn setup() -> (
        Dispatcher<SimulatedServices>,
        EntityStore,
        SelectionController,
    ) {
        (
            Dispatcher::new(SimulatedServices::new(), DispatchOptions::default()),
            EntityStore::from_seed(seed::sample_data()),
            SelectionController::new(),
        )
    }

    #[test]
    fn test_view_opens_modal() {
        let (mut d, mut store, mut sel) = setup();
        let outcome = d.dispatch(&mut store, &mut sel, Action::ViewTeam("RT002".into()));
        assert!(outcome.is_ok());
        assert_eq!(sel.selected().unwrap().id, "RT002");
    }

    #[test]
    fn test_view_missing_is_noop() {
        let (mut d, mut store, mut sel) = setup();
        let outcome = d.dispatch(&mut store, &mut sel, Action::ViewAlert("ALT999".into()));
        assert!(matches!(outcome.error, Some(SentinelError::NotFound { .. })));
        assert!(!sel.is_open());
    }

    #[test]
    fn test_reject_is_terminal() {
        let (mut d, mut store, mut sel) = setup();
        let outcome = d.dispatch(&mut store, &mut sel, Action::RejectReport("CR002".into()));
        assert!(outcome.is_ok());
        assert_eq!(
            store.report("CR002").unwrap().verification.to_string(),
            "Rejected - Operator Review"
        );

        let again = d.dispatch(&mut store, &mut sel, Action::ApproveReport("CR002".into()));
        assert_eq!(again.error.unwrap().code(), "action_unavailable");
    }

    #[test]
    fn test_auto_alert_on_approve() {
        let options = DispatchOptions {
            auto_alert_on_approve: true,
        };
        let mut d = Dispatcher::new(SimulatedServices::new(), options);
        let mut store = EntityStore::from_seed(seed::sample_data());
        let mut sel = SelectionController::new();

        let outcome = d.dispatch(&mut store, &mut sel, Action::ApproveReport("CR002".into()));
        assert!(outcome.is_ok());
        assert_eq!(outcome.changed.len(), 2);
        let alert = store.alert("ALT004").unwrap();
        assert_eq!(alert.kind, "Fire");
        assert_eq!(alert.status, AlertStatus::Active);
    }

    #[test]
    fn test_auto_alert_duplicate_leaves_report_pending() {
        let options = DispatchOptions {
            auto_alert_on_approve: true,
        };
        let mut d = Dispatcher::new(SimulatedServices::new(), options);
        let mut data = seed::sample_data();
        data.alerts[2].source = "Citizen Report CR002".to_string();
        let mut store = EntityStore::from_seed(data);
        let mut sel = SelectionController::new();
        let revision = store.revision();

        let outcome = d.dispatch(&mut store, &mut sel, Action::ApproveReport("CR002".into()));
        assert_eq!(outcome.error.unwrap().code(), "action_unavailable");
        assert!(outcome.changed.is_empty());
        assert!(store.report("CR002").unwrap().verification.is_pending());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_create_alert_only_once() {
        let (mut d, mut store, mut sel) = setup();
        assert!(d
            .dispatch(&mut store, &mut sel, Action::CreateAlert("CR001".into()))
            .is_ok());
        let dup = d.dispatch(&mut store, &mut sel, Action::CreateAlert("CR001".into()));
        assert!(!dup.is_ok());
        assert_eq!(store.alerts().len(), 4);
    }

    #[test]
    fn test_create_alert_from_rejected_refused() {
        let (mut d, mut store, mut sel) = setup();
        let outcome = d.dispatch(&mut store, &mut sel, Action::CreateAlert("CR003".into()));
        assert_eq!(outcome.error.unwrap().code(), "action_unavailable");
        assert_eq!(store.alerts().len(), 3);
    }

    #[test]
    fn test_deploy_assigns_ready_team() {
        let (mut d, mut store, mut sel) = setup();
        let outcome = d.dispatch(&mut store, &mut sel, Action::DeployResponse("ALT003".into()));
        assert!(outcome.is_ok(), "{:?}", outcome.error);
        let team = store.team("RT003").unwrap();
        assert_eq!(team.status, crate::team::TeamStatus::Deployed);
        assert_eq!(team.destination, "Visakhapatnam, Andhra Pradesh");
    }

    #[test]
    fn test_deploy_without_available_team() {
        let (mut d, mut store, mut sel) = setup();
        assert!(d
            .dispatch(&mut store, &mut sel, Action::DeployResponse("ALT001".into()))
            .is_ok());
        assert!(d
            .dispatch(&mut store, &mut sel, Action::DeployResponse("ALT002".into()))
            .is_ok());
        let outcome = d.dispatch(&mut store, &mut sel, Action::DeployResponse("ALT003".into()));
        assert_eq!(outcome.notice.level, NoticeLevel::Warning);
        assert!(outcome.notice.message.contains("no response team available"));
    }
}
