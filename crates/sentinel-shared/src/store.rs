//! Entity store - the in-memory authoritative snapshot for a session.
//!
//! Holds alerts, citizen reports, response teams and the read-only guideline
//! sets. Every mutation runs inside a single `&mut self` call and emits its
//! change notice before returning, so a mutation and its notification never
//! interleave with another action.
//!
//! Collections keep insertion order, which is also the render order.

use crate::alert::{Alert, AlertStatus};
use crate::error::{Result, SentinelError};
use crate::guideline::GuidelineSet;
use crate::lifecycle::Lifecycle;
use crate::report::{CitizenReport, Verification};
use crate::team::{ResponseTeam, TeamStatus};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Alert,
    Report,
    Team,
    Guideline,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Alert => "alert",
            Self::Report => "report",
            Self::Team => "team",
            Self::Guideline => "guideline",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Entity {
    Alert(Alert),
    Report(CitizenReport),
    Team(ResponseTeam),
    Guideline(GuidelineSet),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Alert(_) => EntityKind::Alert,
            Self::Report(_) => EntityKind::Report,
            Self::Team(_) => EntityKind::Team,
            Self::Guideline(_) => EntityKind::Guideline,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Alert(a) => &a.id,
            Self::Report(r) => &r.id,
            Self::Team(t) => &t.id,
            Self::Guideline(g) => &g.disaster_type,
        }
    }

    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.kind(), self.id())
    }
}

/// Key of an entity without borrowing it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Target state for [`EntityStore::transition`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityState {
    Alert(AlertStatus),
    Report(Verification),
    Team(TeamStatus),
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alert(s) => write!(f, "{}", s),
            Self::Report(v) => write!(f, "{}", v),
            Self::Team(s) => write!(f, "{}", s),
        }
    }
}

/// Sent to subscribers after each mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    pub kind: EntityKind,
    pub id: String,
    /// Store revision after the change
    pub revision: u64,
}

struct Subscriber {
    kinds: Vec<EntityKind>,
    tx: mpsc::UnboundedSender<ChangeNotice>,
}

/// Initial contents of a store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub alerts: Vec<Alert>,
    pub reports: Vec<CitizenReport>,
    pub teams: Vec<ResponseTeam>,
    pub guidelines: Vec<GuidelineSet>,
}

#[derive(Default)]
pub struct EntityStore {
    alerts: Vec<Alert>,
    reports: Vec<CitizenReport>,
    teams: Vec<ResponseTeam>,
    guidelines: Vec<GuidelineSet>,
    subscribers: Vec<Subscriber>,
    revision: u64,
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("alerts", &self.alerts.len())
            .field("reports", &self.reports.len())
            .field("teams", &self.teams.len())
            .field("guidelines", &self.guidelines.len())
            .field("subscribers", &self.subscribers.len())
            .field("revision", &self.revision)
            .finish()
    }
}

/// Replace by id or append, keeping ids unique
fn put<T>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(&item).to_string();
    match items.iter_mut().find(|existing| id_of(existing) == id) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

/// A replacement may keep the current state or take one legal step
fn check_replacement<S: Lifecycle>(kind: EntityKind, id: &str, from: S, to: S) -> Result<()> {
    if from == to {
        Ok(())
    } else {
        check_transition(kind, id, from, to)
    }
}

fn check_transition<S: Lifecycle>(kind: EntityKind, id: &str, from: S, to: S) -> Result<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(SentinelError::InvalidTransition {
            kind,
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let mut store = Self::new();
        for alert in seed.alerts {
            put(&mut store.alerts, alert, |a| a.id.as_str());
        }
        for report in seed.reports {
            put(&mut store.reports, report, |r| r.id.as_str());
        }
        for team in seed.teams {
            put(&mut store.teams, team, |t| t.id.as_str());
        }
        for set in seed.guidelines {
            put(&mut store.guidelines, set, |g| g.disaster_type.as_str());
        }
        debug!(
            alerts = store.alerts.len(),
            reports = store.reports.len(),
            teams = store.teams.len(),
            "entity store initialized"
        );
        store
    }

    /// Drop all subscribers. Their receivers observe a closed channel.
    pub fn shutdown(&mut self) {
        debug!(subscribers = self.subscribers.len(), "entity store shutting down");
        self.subscribers.clear();
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn reports(&self) -> &[CitizenReport] {
        &self.reports
    }

    pub fn teams(&self) -> &[ResponseTeam] {
        &self.teams
    }

    pub fn guideline_sets(&self) -> &[GuidelineSet] {
        &self.guidelines
    }

    pub fn alert(&self, id: &str) -> Result<&Alert> {
        self.alerts
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Alert, id))
    }

    pub fn report(&self, id: &str) -> Result<&CitizenReport> {
        self.reports
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Report, id))
    }

    pub fn team(&self, id: &str) -> Result<&ResponseTeam> {
        self.teams
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Team, id))
    }

    pub fn guidelines(&self, disaster_type: &str) -> Result<&GuidelineSet> {
        self.guidelines
            .iter()
            .find(|g| g.disaster_type == disaster_type)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Guideline, disaster_type))
    }

    pub fn get_all(&self, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::Alert => self.alerts.iter().cloned().map(Entity::Alert).collect(),
            EntityKind::Report => self.reports.iter().cloned().map(Entity::Report).collect(),
            EntityKind::Team => self.teams.iter().cloned().map(Entity::Team).collect(),
            EntityKind::Guideline => self
                .guidelines
                .iter()
                .cloned()
                .map(Entity::Guideline)
                .collect(),
        }
    }

    pub fn get_by_id(&self, kind: EntityKind, id: &str) -> Result<Entity> {
        match kind {
            EntityKind::Alert => self.alert(id).cloned().map(Entity::Alert),
            EntityKind::Report => self.report(id).cloned().map(Entity::Report),
            EntityKind::Team => self.team(id).cloned().map(Entity::Team),
            EntityKind::Guideline => self.guidelines(id).cloned().map(Entity::Guideline),
        }
    }

    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.get_by_id(entity.kind, &entity.id).is_ok()
    }

    /// Insert or replace an entity of `kind`. Guidelines are read-only.
    ///
    /// Replacing an existing entity must respect its state machine: a changed
    /// state has to be a legal successor, otherwise `InvalidTransition`.
    pub fn upsert(&mut self, kind: EntityKind, entity: Entity) -> Result<()> {
        if entity.kind() != kind {
            return Err(SentinelError::KindMismatch {
                expected: kind,
                actual: entity.kind(),
            });
        }
        let id = entity.id().to_string();
        match entity {
            Entity::Alert(alert) => {
                if let Ok(current) = self.alert(&id) {
                    check_replacement(kind, &id, current.status, alert.status)?;
                }
                put(&mut self.alerts, alert, |a| a.id.as_str())
            }
            Entity::Report(report) => {
                if let Ok(current) = self.report(&id) {
                    check_replacement(
                        kind,
                        &id,
                        current.verification.state,
                        report.verification.state,
                    )?;
                }
                put(&mut self.reports, report, |r| r.id.as_str())
            }
            Entity::Team(team) => {
                if let Ok(current) = self.team(&id) {
                    check_replacement(kind, &id, current.status, team.status)?;
                }
                put(&mut self.teams, team, |t| t.id.as_str())
            }
            Entity::Guideline(_) => return Err(SentinelError::ReadOnly(kind)),
        }
        self.notify(kind, &id);
        Ok(())
    }

    /// Move an entity to `to`. Fails with `InvalidTransition` when `to` is not
    /// a successor of the current state, or names another kind's machine.
    pub fn transition(&mut self, kind: EntityKind, id: &str, to: EntityState) -> Result<()> {
        match (kind, to) {
            (EntityKind::Alert, EntityState::Alert(next)) => {
                let alert = self.alert_mut(id)?;
                check_transition(kind, id, alert.status, next)?;
                alert.status = next;
            }
            (EntityKind::Report, EntityState::Report(next)) => {
                let report = self.report_mut(id)?;
                check_transition(kind, id, report.verification.state, next.state)?;
                report.verification = next;
            }
            (EntityKind::Team, EntityState::Team(next)) => {
                let team = self.team_mut(id)?;
                check_transition(kind, id, team.status, next)?;
                team.status = next;
            }
            (kind, to) => {
                let from = self.state_label(kind, id)?;
                return Err(SentinelError::InvalidTransition {
                    kind,
                    id: id.to_string(),
                    from,
                    to: to.to_string(),
                });
            }
        }
        self.notify(kind, id);
        Ok(())
    }

    /// Deploy a team toward `destination` as one mutation
    pub fn assign_team(&mut self, id: &str, destination: &str) -> Result<()> {
        let team = self.team_mut(id)?;
        check_transition(EntityKind::Team, id, team.status, TeamStatus::Deployed)?;
        team.status = TeamStatus::Deployed;
        team.destination = destination.to_string();
        self.notify(EntityKind::Team, id);
        Ok(())
    }

    /// First team able to take a deployment, Ready before Standby
    pub fn first_available_team(&self) -> Option<&ResponseTeam> {
        self.teams
            .iter()
            .find(|t| t.status == TeamStatus::Ready)
            .or_else(|| self.teams.iter().find(|t| t.status.is_available()))
    }

    /// Allocate the next `ALT###` id
    pub fn next_alert_id(&self) -> String {
        let max = self
            .alerts
            .iter()
            .filter_map(|a| a.id.strip_prefix("ALT"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        format!("ALT{:03}", max.saturating_add(1))
    }

    /// Receive a notice for every change to one of `kinds`
    pub fn subscribe(&mut self, kinds: &[EntityKind]) -> mpsc::UnboundedReceiver<ChangeNotice> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(Subscriber {
            kinds: kinds.to_vec(),
            tx,
        });
        rx
    }

    fn notify(&mut self, kind: EntityKind, id: &str) {
        self.revision += 1;
        self.subscribers.retain(|s| !s.tx.is_closed());
        let notice = ChangeNotice {
            kind,
            id: id.to_string(),
            revision: self.revision,
        };
        for sub in self.subscribers.iter().filter(|s| s.kinds.contains(&kind)) {
            let _ = sub.tx.send(notice.clone());
        }
        trace!(%kind, id, revision = self.revision, "change notified");
    }

    fn state_label(&self, kind: EntityKind, id: &str) -> Result<String> {
        Ok(match kind {
            EntityKind::Alert => self.alert(id)?.status.to_string(),
            EntityKind::Report => self.report(id)?.verification.to_string(),
            EntityKind::Team => self.team(id)?.status.to_string(),
            EntityKind::Guideline => {
                self.guidelines(id)?;
                "reference".to_string()
            }
        })
    }

    fn alert_mut(&mut self, id: &str) -> Result<&mut Alert> {
        self.alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Alert, id))
    }

    fn report_mut(&mut self, id: &str) -> Result<&mut CitizenReport> {
        self.reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Report, id))
    }

    fn team_mut(&mut self, id: &str) -> Result<&mut ResponseTeam> {
        self.teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| SentinelError::not_found(EntityKind::Team, id))
    }
}
