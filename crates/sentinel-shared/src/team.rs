//! Response teams.

use crate::geo::Location;
use crate::lifecycle::Lifecycle;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamStatus {
    Standby,
    Ready,
    Deployed,
    Returning,
}

impl TeamStatus {
    /// Whether the team can take a new deployment
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Standby | Self::Ready)
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Standby => "standby",
            Self::Ready => "ready",
            Self::Deployed => "deployed",
            Self::Returning => "returning",
        }
    }
}

impl Lifecycle for TeamStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Standby => &[Self::Ready, Self::Deployed],
            Self::Ready => &[Self::Deployed],
            Self::Deployed => &[Self::Returning],
            // Back at base closes the cycle
            Self::Returning => &[Self::Standby],
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Standby => "Standby",
            Self::Ready => "Ready",
            Self::Deployed => "Deployed",
            Self::Returning => "Returning",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseTeam {
    pub id: String,
    pub kind: String,
    pub current_location: Location,
    pub destination: String,
    pub status: TeamStatus,
    pub eta: Duration,
    pub personnel: u32,
}

impl ResponseTeam {
    pub fn eta_label(&self) -> String {
        format_eta(self.eta)
    }
}

/// "15 minutes", "1 hour 5 minutes"
pub fn format_eta(eta: Duration) -> String {
    let total_mins = eta.as_secs() / 60;
    let hours = total_mins / 60;
    let mins = total_mins % 60;
    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("1 {}", unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };
    match (hours, mins) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
    }
}
