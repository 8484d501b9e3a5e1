//! Dashboard summary figures.

use crate::alert::AlertStatus;
use crate::report::VerificationState;
use crate::store::EntityStore;
use crate::team::TeamStatus;
use serde::Serialize;

/// Share of monitored risk by disaster type, in percent
pub const RISK_DISTRIBUTION: [(&str, u64); 5] = [
    ("Flood", 35),
    ("Earthquake", 25),
    ("Fire", 20),
    ("Cyclone", 15),
    ("Other", 5),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Alerts not yet resolved
    pub open_alerts: usize,
    pub critical_alerts: usize,
    pub pending_reports: usize,
    pub verified_reports: usize,
    pub deployed_teams: usize,
    pub available_teams: usize,
    pub personnel_deployed: u32,
    /// Sum over open alerts
    pub affected_population: u64,
}

impl DashboardSummary {
    pub fn from_store(store: &EntityStore) -> Self {
        let open: Vec<_> = store
            .alerts()
            .iter()
            .filter(|a| a.status != AlertStatus::Resolved)
            .collect();
        let deployed: Vec<_> = store
            .teams()
            .iter()
            .filter(|t| t.status == TeamStatus::Deployed)
            .collect();

        Self {
            open_alerts: open.len(),
            critical_alerts: open
                .iter()
                .filter(|a| a.severity == crate::alert::Severity::Critical)
                .count(),
            pending_reports: count_reports(store, VerificationState::Pending),
            verified_reports: count_reports(store, VerificationState::Verified),
            deployed_teams: deployed.len(),
            available_teams: store
                .teams()
                .iter()
                .filter(|t| t.status.is_available())
                .count(),
            personnel_deployed: deployed.iter().map(|t| t.personnel).sum(),
            affected_population: open.iter().map(|a| a.affected_population).sum(),
        }
    }
}

fn count_reports(store: &EntityStore, state: VerificationState) -> usize {
    store
        .reports()
        .iter()
        .filter(|r| r.verification.state == state)
        .count()
}
