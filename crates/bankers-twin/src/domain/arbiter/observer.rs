//! ArbiterObserver - Hooks into each step of the request protocol
//!
//! # Zero-Cost Abstraction
//!
//! - **Default**: [`NoOpObserver`]
//!   - All hooks are `#[inline(always)]` with empty bodies
//!   - The arbiter monomorphizes them away completely
//!
//! - **Testing / diagnostics**: [`RecordingObserver`]
//!   - Appends one [`ArbiterEvent`] per hook call
//!   - Lets tests prove, for example, that an infeasible request never
//!     reached `apply_transfer`

use super::types::DenialReason;
use crate::domain::resources::{ProcessId, Units};
use serde::Serialize;

/// Observation interface for [`RequestArbiter`](super::RequestArbiter)
///
/// Hooks fire in protocol order:
///
/// ```text
/// on_request ─┬─ on_denied (infeasible)
///             └─ on_applied ── on_verdict ─┬─ on_commit
///                                          └─ on_rollback
/// ```
pub trait ArbiterObserver {
    /// A well-formed request entered arbitration
    fn on_request(&mut self, process: ProcessId, request: &[Units]);

    /// The feasibility pre-check failed; nothing was applied
    fn on_denied(&mut self, process: ProcessId, reason: DenialReason);

    /// The tentative transfer was applied
    fn on_applied(&mut self, process: ProcessId, request: &[Units]);

    /// The safety oracle judged the tentative state
    fn on_verdict(&mut self, process: ProcessId, safe: bool);

    /// The transfer was kept
    fn on_commit(&mut self, process: ProcessId);

    /// The transfer was reverted
    fn on_rollback(&mut self, process: ProcessId);
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl ArbiterObserver for NoOpObserver {
    #[inline(always)]
    fn on_request(&mut self, _process: ProcessId, _request: &[Units]) {}

    #[inline(always)]
    fn on_denied(&mut self, _process: ProcessId, _reason: DenialReason) {}

    #[inline(always)]
    fn on_applied(&mut self, _process: ProcessId, _request: &[Units]) {}

    #[inline(always)]
    fn on_verdict(&mut self, _process: ProcessId, _safe: bool) {}

    #[inline(always)]
    fn on_commit(&mut self, _process: ProcessId) {}

    #[inline(always)]
    fn on_rollback(&mut self, _process: ProcessId) {}
}

/// One recorded protocol step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ArbiterEvent {
    /// See [`ArbiterObserver::on_request`]
    Requested {
        /// Requesting process
        process: ProcessId,
        /// Requested vector
        request: Vec<Units>,
    },
    /// See [`ArbiterObserver::on_denied`]
    Denied {
        /// Requesting process
        process: ProcessId,
        /// Pre-check failure
        reason: DenialReason,
    },
    /// See [`ArbiterObserver::on_applied`]
    Applied {
        /// Requesting process
        process: ProcessId,
        /// Applied vector
        request: Vec<Units>,
    },
    /// See [`ArbiterObserver::on_verdict`]
    Verdict {
        /// Requesting process
        process: ProcessId,
        /// Safety of the tentative state
        safe: bool,
    },
    /// See [`ArbiterObserver::on_commit`]
    Committed {
        /// Requesting process
        process: ProcessId,
    },
    /// See [`ArbiterObserver::on_rollback`]
    RolledBack {
        /// Requesting process
        process: ProcessId,
    },
}

/// Observer that records every hook call
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<ArbiterEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far, oldest first
    pub fn events(&self) -> &[ArbiterEvent] {
        &self.events
    }

    /// Number of tentative transfers applied
    pub fn applied_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ArbiterEvent::Applied { .. }))
            .count()
    }

    /// Number of rollbacks performed
    pub fn rollback_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ArbiterEvent::RolledBack { .. }))
            .count()
    }

    /// Drop all recorded events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ArbiterObserver for RecordingObserver {
    fn on_request(&mut self, process: ProcessId, request: &[Units]) {
        self.events.push(ArbiterEvent::Requested {
            process,
            request: request.to_vec(),
        });
    }

    fn on_denied(&mut self, process: ProcessId, reason: DenialReason) {
        self.events.push(ArbiterEvent::Denied { process, reason });
    }

    fn on_applied(&mut self, process: ProcessId, request: &[Units]) {
        self.events.push(ArbiterEvent::Applied {
            process,
            request: request.to_vec(),
        });
    }

    fn on_verdict(&mut self, process: ProcessId, safe: bool) {
        self.events.push(ArbiterEvent::Verdict { process, safe });
    }

    fn on_commit(&mut self, process: ProcessId) {
        self.events.push(ArbiterEvent::Committed { process });
    }

    fn on_rollback(&mut self, process: ProcessId) {
        self.events.push(ArbiterEvent::RolledBack { process });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer_counts() {
        let mut obs = RecordingObserver::new();
        obs.on_request(ProcessId(0), &[1, 0]);
        obs.on_applied(ProcessId(0), &[1, 0]);
        obs.on_verdict(ProcessId(0), false);
        obs.on_rollback(ProcessId(0));

        assert_eq!(obs.events().len(), 4);
        assert_eq!(obs.applied_count(), 1);
        assert_eq!(obs.rollback_count(), 1);

        obs.clear();
        assert!(obs.events().is_empty());
    }
}
