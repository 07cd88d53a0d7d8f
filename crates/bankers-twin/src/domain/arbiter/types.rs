//! Arbitration outcomes

use crate::domain::resources::{ResourceId, Units};
use serde::Serialize;
use std::fmt;

/// Why a request was not granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DenialReason {
    /// Some component exceeds Available; nothing was applied
    Infeasible {
        /// First offending resource type
        resource: ResourceId,
        /// Amount requested of it
        requested: Units,
        /// Amount available of it
        available: Units,
    },
    /// The tentative state was unsafe and has been rolled back
    Unsafe,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infeasible {
                resource,
                requested,
                available,
            } => write!(
                f,
                "infeasible: requested {requested} of {resource}, {available} available"
            ),
            Self::Unsafe => write!(f, "unsafe"),
        }
    }
}

/// Result of one arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Transfer committed
    Granted,
    /// State unchanged
    Denied(DenialReason),
}

impl Decision {
    /// True for [`Decision::Granted`]
    #[inline]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// The denial reason, if denied
    pub const fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Granted => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied(reason) => write!(f, "denied ({reason})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_display() {
        assert_eq!(Decision::Granted.to_string(), "granted");
        assert_eq!(
            Decision::Denied(DenialReason::Unsafe).to_string(),
            "denied (unsafe)"
        );
        let infeasible = Decision::Denied(DenialReason::Infeasible {
            resource: ResourceId(0),
            requested: 4,
            available: 3,
        });
        assert_eq!(
            infeasible.to_string(),
            "denied (infeasible: requested 4 of r0, 3 available)"
        );
    }

    #[test]
    fn test_decision_accessors() {
        assert!(Decision::Granted.is_granted());
        assert_eq!(Decision::Granted.denial(), None);
        let denied = Decision::Denied(DenialReason::Unsafe);
        assert!(!denied.is_granted());
        assert_eq!(denied.denial(), Some(DenialReason::Unsafe));
    }

    #[test]
    fn test_decision_serializes_tagged() {
        let json = serde_json::to_string(&Decision::Granted).unwrap();
        assert_eq!(json, r#"{"decision":"granted"}"#);
    }
}
