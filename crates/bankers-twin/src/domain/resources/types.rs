//! Core Types for Resource Accounting

use serde::{Deserialize, Serialize};
use std::fmt;

/// Count of units of one resource type
///
/// Unsigned, so "never negative" holds by construction. Mutation primitives
/// use checked arithmetic and report underflow as an invariant violation.
pub type Units = u32;

/// Upper bound on the number of processes in one scenario
///
/// Finished-sets are single `u64` bitmaps (see [`ProcessSet`](crate::domain::safety::ProcessSet)).
pub const MAX_PROCESSES: usize = 64;

/// Process identifier (row index into Max / Allocation / Need)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Create a new process identifier
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying usize value
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Resource type identifier (column index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl ResourceId {
    /// Create a new resource identifier
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying usize value
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Literal description of an initial state
///
/// This is the unvalidated, serde-facing form. Convert it with
/// `ResourceState::try_from(spec)`, which enforces the construction-time
/// invariants.
///
/// ```json
/// {
///   "available": [3, 3],
///   "max": [[3, 2], [2, 2]],
///   "allocation": [[1, 0], [0, 1]]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSpec {
    /// Unallocated units per resource type
    pub available: Vec<Units>,
    /// Declared maximum claim per process
    pub max: Vec<Vec<Units>>,
    /// Units currently held per process
    pub allocation: Vec<Vec<Units>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ProcessId::new(3).to_string(), "p3");
        assert_eq!(ResourceId::new(0).to_string(), "r0");
        assert_eq!(ProcessId(7).as_usize(), 7);
    }

    #[test]
    fn test_state_spec_json() {
        let spec: StateSpec = serde_json::from_str(
            r#"{"available":[3,3],"max":[[3,2],[2,2]],"allocation":[[1,0],[0,1]]}"#,
        )
        .unwrap();
        assert_eq!(spec.available, vec![3, 3]);
        assert_eq!(spec.max[1], vec![2, 2]);
        assert_eq!(spec.allocation[0], vec![1, 0]);
    }
}
