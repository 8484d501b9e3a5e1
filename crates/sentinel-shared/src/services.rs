//! Capability interface to dispatch, messaging, mapping and verification
//! backends.
//!
//! The dispatcher only talks to [`ResponseServices`]. `SimulatedServices`
//! answers immediately with canned acknowledgements; a real backend would
//! implement the same trait.

use crate::action::BulletinKind;
use crate::error::{Result, SentinelError};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handle to a live tracking session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSessionRef {
    pub session_id: String,
    pub message: String,
}

/// Handle to an open communication channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef {
    pub channel: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Photos and location check out
    pub authentic: bool,
    /// Shown after the verification state, e.g. "via Google Lens"
    pub qualifier: String,
}

pub trait ResponseServices {
    fn deploy_response(&mut self, alert_id: &str) -> Result<Ack>;
    fn broadcast(&mut self, alert_id: &str) -> Result<Ack>;
    fn track_team(&mut self, team_id: &str) -> Result<MapSessionRef>;
    fn contact_team(&mut self, team_id: &str) -> Result<ChannelRef>;
    fn verify_report(&mut self, report_id: &str) -> Result<VerificationResult>;
    fn bulletin(&mut self, kind: BulletinKind) -> Result<Ack>;
}

/// In-process stand-in for the backends
#[derive(Debug, Clone)]
pub struct SimulatedServices {
    online: bool,
}

impl Default for SimulatedServices {
    fn default() -> Self {
        Self { online: true }
    }
}

impl SimulatedServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `ServiceUnavailable`
    pub fn offline() -> Self {
        Self { online: false }
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    fn ensure_online(&self, service: &str) -> Result<()> {
        if self.online {
            Ok(())
        } else {
            Err(SentinelError::unavailable(service, "backend offline"))
        }
    }
}

impl ResponseServices for SimulatedServices {
    fn deploy_response(&mut self, alert_id: &str) -> Result<Ack> {
        self.ensure_online("dispatch")?;
        info!(alert_id, "simulated deployment");
        Ok(Ack::new(format!(
            "Response team deployed for alert {}. Real-time tracking activated.",
            alert_id
        )))
    }

    fn broadcast(&mut self, alert_id: &str) -> Result<Ack> {
        self.ensure_online("messaging")?;
        info!(alert_id, "simulated broadcast");
        Ok(Ack::new(format!(
            "Alert {} broadcasted to all affected areas with location-specific evacuation routes.",
            alert_id
        )))
    }

    fn track_team(&mut self, team_id: &str) -> Result<MapSessionRef> {
        self.ensure_online("mapping")?;
        let session_id = Uuid::new_v4().to_string();
        info!(team_id, %session_id, "simulated tracking session");
        Ok(MapSessionRef {
            message: format!(
                "Real-time tracking opened for team {}. Live GPS location and route optimization enabled.",
                team_id
            ),
            session_id,
        })
    }

    fn contact_team(&mut self, team_id: &str) -> Result<ChannelRef> {
        self.ensure_online("messaging")?;
        info!(team_id, "simulated contact");
        Ok(ChannelRef {
            channel: format!("radio/{}", team_id.to_lowercase()),
            message: format!(
                "Establishing communication with team {}. Radio and mobile connectivity confirmed.",
                team_id
            ),
        })
    }

    fn verify_report(&mut self, report_id: &str) -> Result<VerificationResult> {
        self.ensure_online("verification")?;
        info!(report_id, "simulated photo and location verification");
        Ok(VerificationResult {
            authentic: true,
            qualifier: "via Google Lens".to_string(),
        })
    }

    fn bulletin(&mut self, kind: BulletinKind) -> Result<Ack> {
        self.ensure_online("messaging")?;
        info!(bulletin = kind.slug(), "simulated bulletin");
        let message = match kind {
            BulletinKind::BroadcastAlert => {
                "Critical alert broadcasted to all emergency services and citizens in affected areas"
            }
            BulletinKind::DeployTeam => {
                "Emergency response team deployment initiated. Teams will be dispatched to critical zones."
            }
            BulletinKind::SendSos => {
                "SOS messages with evacuation guidelines sent to all citizens in affected areas"
            }
            BulletinKind::UpdateStatus => {
                "System status updated and synchronized with all connected IoT sensors and AI models"
            }
            BulletinKind::EmergencyAlert => {
                "Emergency alert sent to all affected citizens with evacuation instructions and routes"
            }
            BulletinKind::BroadcastGuidelines => {
                "Safety guidelines broadcasted to all registered mobile devices with location-specific instructions"
            }
            BulletinKind::UpdateHelplines => {
                "Helpline numbers updated and distributed to all citizens through the mobile app"
            }
        };
        Ok(Ack::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_acks() {
        let mut services = SimulatedServices::new();
        let ack = services.deploy_response("ALT001").unwrap();
        assert!(ack.message.contains("ALT001"));

        let session = services.track_team("RT002").unwrap();
        assert!(Uuid::parse_str(&session.session_id).is_ok());

        let channel = services.contact_team("RT002").unwrap();
        assert_eq!(channel.channel, "radio/rt002");
    }

    #[test]
    fn test_offline_reports_unavailable() {
        let mut services = SimulatedServices::offline();
        let err = services.broadcast("ALT001").unwrap_err();
        assert_eq!(err.code(), "service_unavailable");

        services.set_online(true);
        assert!(services.bulletin(BulletinKind::SendSos).is_ok());
    }
}
