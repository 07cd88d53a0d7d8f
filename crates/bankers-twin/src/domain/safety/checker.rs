//! SafetyChecker - Greedy fixed-point safety simulation
//!
//! # Algorithm
//!
//! ```text
//! work     := Available
//! finished := {}
//! repeat
//!     progress := false
//!     for p in 0..P (index order)
//!         if p not in finished and Need[p] <= work
//!             work     := work + Allocation[p]
//!             finished := finished + {p}
//!             progress := true
//! until not progress
//! safe := finished = all processes
//! ```
//!
//! Each pass either finishes at least one process or ends the loop, so the
//! simulation terminates after at most P + 1 passes: O(P^2 * R) overall.
//! It answers *whether* a completion order exists; use
//! [`SequenceValidator`](super::SequenceValidator) for the order itself.

use super::predicate::{can_proceed, initial_work, release_into, ProcessSet};
use crate::domain::resources::{ProcessId, ResourceState};

/// Outcome of one greedy safety simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyVerdict {
    finished: ProcessSet,
    num_processes: usize,
    passes: usize,
}

impl SafetyVerdict {
    /// True iff every process could run to completion
    #[inline]
    pub fn is_safe(&self) -> bool {
        self.finished.is_full(self.num_processes)
    }

    /// Processes the simulation could not finish (empty when safe)
    pub fn stuck_processes(&self) -> Vec<ProcessId> {
        self.finished.complement(self.num_processes)
    }

    /// Number of scans performed, including the final no-progress scan
    #[inline]
    pub fn passes(&self) -> usize {
        self.passes
    }
}

/// Greedy Banker's safety check
///
/// Stateless; `Copy` so it can be embedded in arbiters for free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyChecker;

impl SafetyChecker {
    /// Create a new checker
    pub const fn new() -> Self {
        Self
    }

    /// Is `state` safe?
    #[inline]
    pub fn is_safe(&self, state: &ResourceState) -> bool {
        self.check(state).is_safe()
    }

    /// Run the simulation and keep its diagnostics
    pub fn check(&self, state: &ResourceState) -> SafetyVerdict {
        let mut work = initial_work(state);
        let mut finished = ProcessSet::new();
        let mut passes = 0;

        loop {
            passes += 1;
            let mut progress = false;

            for p in state.processes() {
                if !finished.contains(p) && can_proceed(state.need(p), &work) {
                    release_into(&mut work, state.allocation(p));
                    finished.insert(p);
                    progress = true;
                }
            }

            tracing::trace!(pass = passes, finished = finished.len(), "safety pass");

            if !progress {
                break;
            }
        }

        SafetyVerdict {
            finished,
            num_processes: state.num_processes(),
            passes,
        }
    }
}
