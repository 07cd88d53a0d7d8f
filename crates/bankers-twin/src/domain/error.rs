//! Domain Error Types
//!
//! Every failure the engine can report, grouped into four kinds:
//!
//! | Kind                 | Meaning                                         | Fatal |
//! |----------------------|-------------------------------------------------|-------|
//! | `Configuration`      | Scenario cannot be built from the given inputs  | yes   |
//! | `InvariantViolation` | A mutation primitive caught a broken invariant  | yes   |
//! | `OracleMismatch`     | Checker and search oracle disagree              | yes   |
//! | `Usage`              | Caller broke an operation's precondition        | no    |
//!
//! A denied request is **not** an error. It is returned as
//! [`Decision::Denied`](crate::domain::arbiter::Decision) data.

use super::resources::{ProcessId, ResourceId, Units};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error Kind
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Coarse classification of a [`BankerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad scenario parameters or initial matrices
    Configuration,
    /// Defensive check inside `ResourceState` tripped
    InvariantViolation,
    /// Greedy checker and search oracle disagree
    OracleMismatch,
    /// Contract breach by the caller (driver)
    Usage,
}

impl ErrorKind {
    /// Whether the current scenario (and any verification run) must stop
    #[inline]
    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Usage)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Banker Error
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Errors raised by the resource-allocation engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankerError {
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Configuration Errors
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// P or R is zero
    #[error("configuration error: need at least one process and one resource type (got {processes} processes, {resources} resources)")]
    ZeroDimension {
        /// Requested process count
        processes: usize,
        /// Requested resource type count
        resources: usize,
    },

    /// More processes than the finished-set bitmap can track
    #[error("configuration error: {processes} processes exceeds the supported maximum of {max}")]
    TooManyProcesses {
        /// Requested process count
        processes: usize,
        /// Supported maximum
        max: usize,
    },

    /// Cross-checking requested on a state too large for the search oracle
    #[error("configuration error: cross-checking {processes} processes exceeds the search oracle limit of {max}")]
    OracleTooLarge {
        /// Process count of the state
        processes: usize,
        /// Largest process count the search is run on
        max: usize,
    },

    /// A matrix or vector has the wrong length
    #[error("configuration error: {what} has length {actual}, expected {expected}")]
    ShapeMismatch {
        /// Which input was malformed
        what: &'static str,
        /// Length implied by P or R
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Initial Allocation[p][r] > Max[p][r]
    #[error("configuration error: allocation {allocation} exceeds max {max} for {process}/{resource}")]
    AllocationExceedsMax {
        /// Offending process
        process: ProcessId,
        /// Offending resource type
        resource: ResourceId,
        /// Supplied allocation
        allocation: Units,
        /// Declared maximum
        max: Units,
    },

    /// A value source was asked for an empty range
    #[error("configuration error: empty choice range [{low}, {high}]")]
    InvalidRange {
        /// Lower bound
        low: Units,
        /// Upper bound
        high: Units,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Fatal Contract Breaches
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// A state invariant does not hold
    #[error("invariant violation [{invariant}]: {detail}")]
    InvariantViolation {
        /// Short invariant name
        invariant: &'static str,
        /// What was observed
        detail: String,
    },

    /// The greedy checker and the exhaustive search disagree
    #[error("oracle mismatch: safety checker says {}, search oracle {}",
        verdict_word(.checker_safe), search_word(.sequence_found))]
    OracleMismatch {
        /// Verdict of the greedy checker
        checker_safe: bool,
        /// Whether the depth-first search produced an order
        sequence_found: bool,
    },

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Usage Errors
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Process index out of bounds
    #[error("unknown process {process} (scenario has {num_processes})")]
    InvalidProcess {
        /// Offending process
        process: ProcessId,
        /// Process count of the scenario
        num_processes: usize,
    },

    /// Request vector has the wrong number of components
    #[error("request has {actual} components, scenario has {expected} resource types")]
    RequestShape {
        /// R
        expected: usize,
        /// Supplied length
        actual: usize,
    },

    /// Request component larger than the process's remaining need
    #[error("{process} requested {requested} of {resource} but only needs {need}")]
    RequestExceedsNeed {
        /// Requesting process
        process: ProcessId,
        /// Resource type
        resource: ResourceId,
        /// Requested amount
        requested: Units,
        /// Remaining need
        need: Units,
    },

    /// A scripted source ran out of values
    #[error("value source exhausted after {consumed} values")]
    SourceExhausted {
        /// Values consumed before exhaustion
        consumed: usize,
    },

    /// A scripted source produced a value outside the requested range
    #[error("value source produced {value} outside [{low}, {high}]")]
    ValueOutOfRange {
        /// Produced value
        value: Units,
        /// Lower bound
        low: Units,
        /// Upper bound
        high: Units,
    },
}

impl BankerError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroDimension { .. }
            | Self::TooManyProcesses { .. }
            | Self::OracleTooLarge { .. }
            | Self::ShapeMismatch { .. }
            | Self::AllocationExceedsMax { .. }
            | Self::InvalidRange { .. } => ErrorKind::Configuration,
            Self::InvariantViolation { .. } => ErrorKind::InvariantViolation,
            Self::OracleMismatch { .. } => ErrorKind::OracleMismatch,
            Self::InvalidProcess { .. }
            | Self::RequestShape { .. }
            | Self::RequestExceedsNeed { .. }
            | Self::SourceExhausted { .. }
            | Self::ValueOutOfRange { .. } => ErrorKind::Usage,
        }
    }

    /// Shorthand for `self.kind().is_fatal()`
    #[inline]
    pub const fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }

    pub(crate) fn invariant(invariant: &'static str, detail: impl Into<String>) -> Self {
        Self::InvariantViolation {
            invariant,
            detail: detail.into(),
        }
    }
}

fn verdict_word(safe: &bool) -> &'static str {
    if *safe { "safe" } else { "unsafe" }
}

fn search_word(found: &bool) -> &'static str {
    if *found {
        "found a completion order"
    } else {
        "found no completion order"
    }
}
