//! Error types for Sentinel.
//!
//! None of these are fatal to the console. Lookups that miss are logged and
//! treated as no-ops, rejected transitions leave the store untouched, and
//! service failures surface as a notice to the operator.

use crate::store::EntityKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentinelError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} {id}: cannot move from {from} to {to}")]
    InvalidTransition {
        kind: EntityKind,
        id: String,
        from: String,
        to: String,
    },

    #[error("{service} service unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },

    #[error("expected a {expected} entity, got {actual}")]
    KindMismatch {
        expected: EntityKind,
        actual: EntityKind,
    },

    #[error("{0} collection is read-only")]
    ReadOnly(EntityKind),

    #[error("invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("action {action} not available for {id}: {reason}")]
    ActionUnavailable {
        action: String,
        id: String,
        reason: String,
    },
}

impl SentinelError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn unavailable(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, used in log lines and notices
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::ServiceUnavailable { .. } => "service_unavailable",
            Self::KindMismatch { .. } => "kind_mismatch",
            Self::ReadOnly(_) => "read_only",
            Self::InvalidCoordinates { .. } => "invalid_coordinates",
            Self::UnknownAction(_) => "unknown_action",
            Self::ActionUnavailable { .. } => "action_unavailable",
        }
    }
}

pub type Result<T> = std::result::Result<T, SentinelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SentinelError::not_found(EntityKind::Report, "CR999");
        assert_eq!(err.to_string(), "report CR999 not found");
        assert_eq!(err.code(), "not_found");

        let err = SentinelError::unavailable("dispatch", "timeout");
        assert_eq!(err.to_string(), "dispatch service unavailable: timeout");
    }

    #[test]
    fn test_transition_message() {
        let err = SentinelError::InvalidTransition {
            kind: EntityKind::Team,
            id: "RT001".to_string(),
            from: "deployed".to_string(),
            to: "ready".to_string(),
        };
        assert_eq!(err.to_string(), "team RT001: cannot move from deployed to ready");
    }
}
