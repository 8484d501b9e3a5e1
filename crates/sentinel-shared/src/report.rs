//! Citizen reports and their verification lifecycle.

use crate::alert::{Severity, TIME_FORMAT};
use crate::geo::Location;
use crate::lifecycle::Lifecycle;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reporter name shown when the citizen chose not to identify
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    Pending,
    Verified,
    Rejected,
}

impl Lifecycle for VerificationState {
    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Verified, Self::Rejected],
            Self::Verified | Self::Rejected => &[],
        }
    }
}

impl std::fmt::Display for VerificationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Verified => "Verified",
            Self::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

/// Verification state plus the free-text qualifier shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub state: VerificationState,
    #[serde(default)]
    pub qualifier: String,
}

impl Verification {
    pub fn pending() -> Self {
        Self {
            state: VerificationState::Pending,
            qualifier: "Verification".to_string(),
        }
    }

    pub fn verified(qualifier: impl Into<String>) -> Self {
        Self {
            state: VerificationState::Verified,
            qualifier: qualifier.into(),
        }
    }

    pub fn rejected(qualifier: impl Into<String>) -> Self {
        Self {
            state: VerificationState::Rejected,
            qualifier: qualifier.into(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state == VerificationState::Pending
    }
}

/// Renders as "Pending Verification", "Verified via Google Lens",
/// "Rejected - Location Mismatch".
impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.qualifier.is_empty() {
            return write!(f, "{}", self.state);
        }
        match self.state {
            VerificationState::Rejected => write!(f, "{} - {}", self.state, self.qualifier),
            _ => write!(f, "{} {}", self.state, self.qualifier),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitizenReport {
    pub id: String,
    pub kind: String,
    pub reporter: String,
    pub location: Location,
    pub timestamp: NaiveDateTime,
    pub description: String,
    /// Photo references in upload order
    #[serde(default)]
    pub photos: Vec<String>,
    pub verification: Verification,
    pub location_verified: bool,
    pub priority: Severity,
}

impl CitizenReport {
    pub fn time_label(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }

    pub fn is_anonymous(&self) -> bool {
        self.reporter == ANONYMOUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_display() {
        assert_eq!(Verification::pending().to_string(), "Pending Verification");
        assert_eq!(
            Verification::verified("via Google Lens").to_string(),
            "Verified via Google Lens"
        );
        assert_eq!(
            Verification::rejected("Location Mismatch").to_string(),
            "Rejected - Location Mismatch"
        );
        assert_eq!(Verification::verified("").to_string(), "Verified");
    }

    #[test]
    fn test_verification_moves_once() {
        assert!(VerificationState::Pending.can_transition_to(VerificationState::Verified));
        assert!(VerificationState::Pending.can_transition_to(VerificationState::Rejected));
        assert!(!VerificationState::Verified.can_transition_to(VerificationState::Rejected));
        assert!(!VerificationState::Rejected.can_transition_to(VerificationState::Pending));
    }
}
