//! Domain Layer
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Resources Module              Safety Module                │
//! │  ├─ ResourceState              ├─ can_proceed / ProcessSet  │
//! │  ├─ apply / revert_transfer    ├─ SafetyChecker (greedy)    │
//! │  └─ check_all_invariants       ├─ SequenceValidator (DFS)   │
//! │                                └─ cross_check               │
//! │                                                             │
//! │  Arbiter Module                Source Module                │
//! │  ├─ RequestArbiter<O, S>       ├─ ValueSource               │
//! │  ├─ NoOp / RecordingObserver   ├─ ScriptedSource            │
//! │  └─ SharedBanker               └─ ExhaustiveSource          │
//! │                                                             │
//! │                    Scenario Module                          │
//! │                    ├─ ScenarioConfig                        │
//! │                    ├─ ScenarioRunner                        │
//! │                    └─ ScenarioReport                        │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Type Aliases for Convenience
//!
//! - `DefaultArbiter`: greedy checker, no observation
//! - `VerifyingArbiter`: search oracle, every step recorded

pub mod arbiter;
pub mod error;
pub mod resources;
pub mod safety;
pub mod scenario;
pub mod source;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-exports
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub use arbiter::{
    ArbiterEvent, ArbiterObserver, Decision, DenialReason, NoOpObserver, RecordingObserver,
    RequestArbiter, SharedBanker,
};
pub use error::{BankerError, ErrorKind};
pub use resources::{
    check_all_invariants, verify_invariants, InvariantViolation, ProcessId, ResourceId,
    ResourceState, StateSpec, Units, MAX_PROCESSES,
};
pub use safety::{
    assess, can_proceed, cross_check, CrossCheck, SafeSequence, SafetyChecker, SafetyOracle,
    SafetyVerdict, SequenceValidator, MAX_ORACLE_PROCESSES,
};
pub use scenario::{generate_state, ScenarioConfig, ScenarioReport, ScenarioRunner, StepReport};
pub use source::{ExhaustiveSource, ScriptedSource, ValueSource};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Type Aliases
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Arbiter for normal use
pub type DefaultArbiter = RequestArbiter<NoOpObserver, SafetyChecker>;

/// Arbiter that decides with the exhaustive search and records every step
pub type VerifyingArbiter = RequestArbiter<RecordingObserver, SequenceValidator>;
