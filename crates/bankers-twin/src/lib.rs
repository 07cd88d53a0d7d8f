//! Banker's Algorithm Digital Twin
//!
//! # Overview
//!
//! `bankers-twin` is a deadlock-avoidance engine. It tracks resource
//! allocation among a fixed set of processes and resource types, decides
//! whether a state is *safe* (some completion order lets every process
//! finish), and arbitrates requests by applying them tentatively and
//! rolling back anything that would leave the system unsafe.
//!
//! # Trinity Architecture
//!
//! - **Domain**: state, safety algorithms, arbitration, scenario driver
//! - **Infrastructure**: JSON documents and encoding
//! - **Adapters**: exhaustive exploration over every bounded input
//!
//! # Invariants
//!
//! Hold after every mutation:
//!
//! - **Bounded**: 0 <= Allocation[p][r] <= Max[p][r]
//! - **Need**: Need[p][r] == Max[p][r] - Allocation[p][r]
//! - **Conservation**: Available[r] + sum_p Allocation[p][r] is constant
//!
//! And between the two safety algorithms:
//!
//! - **Agreement**: `SafetyChecker` says safe iff `SequenceValidator`
//!   finds a completion order
//!
//! # Usage
//!
//! ```rust
//! use bankers_twin::{Decision, ProcessId, RequestArbiter, ResourceState, SafetyChecker};
//!
//! let mut state = ResourceState::new(
//!     vec![3, 3],
//!     vec![vec![3, 2], vec![2, 2]],
//!     vec![vec![1, 0], vec![0, 1]],
//! )
//! .unwrap();
//! assert!(SafetyChecker::new().is_safe(&state));
//!
//! let mut arbiter = RequestArbiter::new();
//! let decision = arbiter.request(&mut state, ProcessId(0), &[1, 1]).unwrap();
//! assert_eq!(decision, Decision::Granted);
//! assert_eq!(state.available(), &[2, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Trinity Architecture Layers
pub mod adapters;
pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// State types
pub use domain::{
    check_all_invariants, verify_invariants, InvariantViolation, ProcessId, ResourceId,
    ResourceState, StateSpec, Units, MAX_PROCESSES,
};

// Safety types
pub use domain::{
    assess, cross_check, CrossCheck, SafeSequence, SafetyChecker, SafetyOracle, SafetyVerdict,
    SequenceValidator, MAX_ORACLE_PROCESSES,
};

// Arbitration types
pub use domain::{
    ArbiterEvent, ArbiterObserver, Decision, DefaultArbiter, DenialReason, NoOpObserver,
    RecordingObserver, RequestArbiter, SharedBanker, VerifyingArbiter,
};

// Scenario types
pub use domain::{
    generate_state, ExhaustiveSource, ScenarioConfig, ScenarioReport, ScenarioRunner,
    ScriptedSource, StepReport, ValueSource,
};

// Errors
pub use domain::{BankerError, ErrorKind};
pub use infrastructure::InfraError;

// Exploration
pub use adapters::{ExplorationSummary, Explorer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_defined() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_primary_types_exported() {
        let _p = ProcessId::new(0);
        let _r = ResourceId::new(0);
        let _config = ScenarioConfig::default();
        let _arbiter: DefaultArbiter = RequestArbiter::new();
    }
}
