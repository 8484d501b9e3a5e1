//! Operator actions.
//!
//! Presentation layers hand over an identifier plus target id; it is decoded
//! once here into [`Action`] and routed by exhaustive match from then on.

use crate::error::{Result, SentinelError};
use crate::report::CitizenReport;
use crate::store::{EntityKind, EntityRef};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dashboard quick actions and SOS controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulletinKind {
    BroadcastAlert,
    DeployTeam,
    SendSos,
    UpdateStatus,
    EmergencyAlert,
    BroadcastGuidelines,
    UpdateHelplines,
}

impl BulletinKind {
    pub const QUICK: [BulletinKind; 4] = [
        Self::BroadcastAlert,
        Self::DeployTeam,
        Self::SendSos,
        Self::UpdateStatus,
    ];

    pub const SOS: [BulletinKind; 3] = [
        Self::EmergencyAlert,
        Self::BroadcastGuidelines,
        Self::UpdateHelplines,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::BroadcastAlert => "broadcast-alert",
            Self::DeployTeam => "deploy-team",
            Self::SendSos => "send-sos",
            Self::UpdateStatus => "update-status",
            Self::EmergencyAlert => "emergency-alert",
            Self::BroadcastGuidelines => "broadcast-guidelines",
            Self::UpdateHelplines => "update-helplines",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BroadcastAlert => "Broadcast Alert",
            Self::DeployTeam => "Deploy Team",
            Self::SendSos => "Send SOS",
            Self::UpdateStatus => "Update Status",
            Self::EmergencyAlert => "Send Emergency Alert",
            Self::BroadcastGuidelines => "Broadcast Guidelines",
            Self::UpdateHelplines => "Update Helpline Numbers",
        }
    }
}

impl FromStr for BulletinKind {
    type Err = SentinelError;

    /// Accepts the slug or the button label
    fn from_str(s: &str) -> Result<Self> {
        Self::QUICK
            .iter()
            .chain(Self::SOS.iter())
            .copied()
            .find(|k| k.slug() == s || k.label() == s)
            .ok_or_else(|| SentinelError::UnknownAction(format!("bulletin {}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "target", rename_all = "kebab-case")]
pub enum Action {
    ViewAlert(String),
    ViewReport(String),
    ViewTeam(String),
    VerifyReport(String),
    ApproveReport(String),
    RejectReport(String),
    CreateAlert(String),
    DeployResponse(String),
    BroadcastAlert(String),
    TrackTeam(String),
    ContactTeam(String),
    Bulletin(BulletinKind),
}

impl Action {
    /// Decode a boundary identifier such as `verify-report` with its target
    pub fn decode(identifier: &str, target: &str) -> Result<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(SentinelError::UnknownAction(format!(
                "{} without target",
                identifier
            )));
        }
        let id = target.to_string();
        let action = match identifier {
            "view-alert" => Self::ViewAlert(id),
            "view-report" => Self::ViewReport(id),
            "view-team" => Self::ViewTeam(id),
            "verify-report" => Self::VerifyReport(id),
            "approve-report" => Self::ApproveReport(id),
            "reject-report" => Self::RejectReport(id),
            "create-alert" => Self::CreateAlert(id),
            "deploy-response" => Self::DeployResponse(id),
            "broadcast-alert" => Self::BroadcastAlert(id),
            "track-team" => Self::TrackTeam(id),
            "contact-team" => Self::ContactTeam(id),
            "bulletin" => Self::Bulletin(target.parse()?),
            other => return Err(SentinelError::UnknownAction(other.to_string())),
        };
        Ok(action)
    }

    pub fn identifier(&self) -> &'static str {
        match self {
            Self::ViewAlert(_) => "view-alert",
            Self::ViewReport(_) => "view-report",
            Self::ViewTeam(_) => "view-team",
            Self::VerifyReport(_) => "verify-report",
            Self::ApproveReport(_) => "approve-report",
            Self::RejectReport(_) => "reject-report",
            Self::CreateAlert(_) => "create-alert",
            Self::DeployResponse(_) => "deploy-response",
            Self::BroadcastAlert(_) => "broadcast-alert",
            Self::TrackTeam(_) => "track-team",
            Self::ContactTeam(_) => "contact-team",
            Self::Bulletin(_) => "bulletin",
        }
    }

    pub fn target(&self) -> &str {
        match self {
            Self::ViewAlert(id)
            | Self::ViewReport(id)
            | Self::ViewTeam(id)
            | Self::VerifyReport(id)
            | Self::ApproveReport(id)
            | Self::RejectReport(id)
            | Self::CreateAlert(id)
            | Self::DeployResponse(id)
            | Self::BroadcastAlert(id)
            | Self::TrackTeam(id)
            | Self::ContactTeam(id) => id,
            Self::Bulletin(kind) => kind.slug(),
        }
    }

    /// Entity the action operates on, if any
    pub fn subject(&self) -> Option<EntityRef> {
        let kind = match self {
            Self::ViewAlert(_) | Self::DeployResponse(_) | Self::BroadcastAlert(_) => {
                EntityKind::Alert
            }
            Self::ViewReport(_)
            | Self::VerifyReport(_)
            | Self::ApproveReport(_)
            | Self::RejectReport(_)
            | Self::CreateAlert(_) => EntityKind::Report,
            Self::ViewTeam(_) | Self::TrackTeam(_) | Self::ContactTeam(_) => EntityKind::Team,
            Self::Bulletin(_) => return None,
        };
        Some(EntityRef::new(kind, self.target()))
    }

    /// Pure "view details" actions keep the modal open
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            Self::ViewAlert(_) | Self::ViewReport(_) | Self::ViewTeam(_)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ViewAlert(_) | Self::ViewReport(_) | Self::ViewTeam(_) => "View Details",
            Self::VerifyReport(_) => "Verify",
            Self::ApproveReport(_) => "Approve Report",
            Self::RejectReport(_) => "Reject Report",
            Self::CreateAlert(_) => "Create Alert",
            Self::DeployResponse(_) => "Deploy Response Team",
            Self::BroadcastAlert(_) => "Broadcast Alert",
            Self::TrackTeam(_) => "Track on Map",
            Self::ContactTeam(_) => "Contact Team",
            Self::Bulletin(kind) => kind.label(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.identifier(), self.target())
    }
}

/// Actions shown on a report card
pub fn report_card_actions(report: &CitizenReport) -> Vec<Action> {
    let mut actions = vec![Action::ViewReport(report.id.clone())];
    if report.verification.is_pending() {
        actions.push(Action::VerifyReport(report.id.clone()));
    }
    actions
}

/// Actions offered in a report's detail panel, gated by verification state.
/// Rejected reports offer nothing.
pub fn report_detail_actions(report: &CitizenReport) -> Vec<Action> {
    use crate::report::VerificationState::*;
    match report.verification.state {
        Pending => vec![
            Action::ApproveReport(report.id.clone()),
            Action::RejectReport(report.id.clone()),
        ],
        Verified => vec![Action::CreateAlert(report.id.clone())],
        Rejected => Vec::new(),
    }
}

pub fn alert_detail_actions(alert_id: &str) -> Vec<Action> {
    vec![
        Action::DeployResponse(alert_id.to_string()),
        Action::BroadcastAlert(alert_id.to_string()),
    ]
}

pub fn team_detail_actions(team_id: &str) -> Vec<Action> {
    vec![
        Action::TrackTeam(team_id.to_string()),
        Action::ContactTeam(team_id.to_string()),
    ]
}
