//! Disaster alerts.

use crate::geo::Location;
use crate::lifecycle::Lifecycle;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used on cards and detail panels
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Severity shared by alerts and report priorities.
/// Ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Lowercase tag used for styling
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    Watch,
    Monitoring,
    Active,
    Resolved,
}

impl Lifecycle for AlertStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Watch => &[Self::Monitoring, Self::Active, Self::Resolved],
            Self::Monitoring => &[Self::Active, Self::Resolved],
            Self::Active => &[Self::Resolved],
            Self::Resolved => &[],
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Watch => "Watch",
            Self::Monitoring => "Monitoring",
            Self::Active => "Active",
            Self::Resolved => "Resolved",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    /// Disaster type, e.g. "Flood"
    pub kind: String,
    pub severity: Severity,
    pub location: Location,
    pub timestamp: NaiveDateTime,
    /// Where the alert came from (sensor network, model, citizen report)
    pub source: String,
    pub description: String,
    pub status: AlertStatus,
    pub affected_population: u64,
}

impl Alert {
    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_status_forward_only() {
        assert!(AlertStatus::Watch.can_transition_to(AlertStatus::Active));
        assert!(AlertStatus::Active.can_transition_to(AlertStatus::Resolved));
        assert!(!AlertStatus::Active.can_transition_to(AlertStatus::Watch));
        assert!(!AlertStatus::Monitoring.can_transition_to(AlertStatus::Monitoring));
        assert!(AlertStatus::Resolved.is_terminal());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical < Severity::Low);
        assert_eq!(Severity::High.tag(), "high");
        assert_eq!(Severity::Medium.to_string(), "Medium");
    }
}
