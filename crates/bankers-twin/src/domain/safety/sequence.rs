//! SequenceValidator - Exhaustive search for a completion order
//!
//! # Overview
//!
//! The ground-truth oracle for [`SafetyChecker`](super::SafetyChecker): a
//! depth-first search over process completion orders that returns an actual
//! safe sequence, or `None` after every branch from the root is exhausted.
//!
//! # Explicit Stack
//!
//! The search does not recurse. All per-depth state lives in fixed arenas
//! sized P + 1 up front:
//!
//! ```text
//! depth d          0        1        2       ...   P
//! work_arena[d]    Avail    +Alloc   +Alloc        (snapshot at depth d)
//! cursor[d]        next candidate index to try at depth d
//! order            [p_0, p_1, ..., p_{d-1}]       (current path)
//! finished         ProcessSet of the current path
//! ```
//!
//! Descending copies `work_arena[d]` into `work_arena[d + 1]` and releases
//! the chosen process's allocation there. Backtracking only pops `order`
//! and clears one bit: the parent's snapshot is still intact in the arena,
//! so no undo arithmetic is needed.
//!
//! # Complexity
//!
//! Worst case O(P!) nodes. Intended for small P as a verification oracle,
//! never on the request path.

use super::predicate::{can_proceed, initial_work, release_into, ProcessSet, Work};
use crate::domain::resources::{ProcessId, ResourceState};
use serde::Serialize;
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Safe Sequence
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A complete process completion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeSequence(Vec<ProcessId>);

impl SafeSequence {
    /// Processes in completion order
    pub fn as_slice(&self) -> &[ProcessId] {
        &self.0
    }

    /// Consume into the raw order
    pub fn into_inner(self) -> Vec<ProcessId> {
        self.0
    }

    /// Number of processes in the order
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty order
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", p)?;
        }
        Ok(())
    }
}

/// Statistics for one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Tentative completions tried (tree edges descended)
    pub explored_nodes: usize,
    /// Number of backtracks performed
    pub backtracks: usize,
    /// Deepest path reached
    pub max_depth: usize,
}

/// Result of [`SequenceValidator::search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The order found, if any
    pub sequence: Option<SafeSequence>,
    /// Search effort
    pub stats: SearchStats,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Validator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Depth-first safe-sequence search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceValidator;

impl SequenceValidator {
    /// Create a new validator
    pub const fn new() -> Self {
        Self
    }

    /// Find a completion order, if one exists
    pub fn find_safe_sequence(&self, state: &ResourceState) -> Option<SafeSequence> {
        self.search(state).sequence
    }

    /// Run the search and keep its statistics
    ///
    /// Candidates at each depth are tried in index order, so the first
    /// order found is the lexicographically smallest safe sequence.
    pub fn search(&self, state: &ResourceState) -> SearchOutcome {
        let num_processes = state.num_processes();

        let mut work_arena: Vec<Work> = vec![initial_work(state); num_processes + 1];
        let mut cursor = vec![0usize; num_processes + 1];
        let mut order: Vec<ProcessId> = Vec::with_capacity(num_processes);
        let mut finished = ProcessSet::new();
        let mut stats = SearchStats::default();

        loop {
            let depth = order.len();
            if depth == num_processes {
                return SearchOutcome {
                    sequence: Some(SafeSequence(order)),
                    stats,
                };
            }

            let candidate = (cursor[depth]..num_processes).map(ProcessId).find(|&p| {
                !finished.contains(p) && can_proceed(state.need(p), &work_arena[depth])
            });

            match candidate {
                Some(p) => {
                    cursor[depth] = p.as_usize() + 1;
                    cursor[depth + 1] = 0;

                    let (parent, child) = work_arena.split_at_mut(depth + 1);
                    child[0].copy_from_slice(&parent[depth]);
                    release_into(&mut child[0], state.allocation(p));

                    finished.insert(p);
                    order.push(p);

                    stats.explored_nodes += 1;
                    stats.max_depth = stats.max_depth.max(depth + 1);
                }
                None => {
                    // Exhausted this depth; the parent snapshot is untouched
                    let Some(p) = order.pop() else {
                        return SearchOutcome { sequence: None, stats };
                    };
                    finished.remove(p);
                    stats.backtracks += 1;
                    tracing::trace!(depth, process = %p, "backtrack");
                }
            }
        }
    }

    /// Does `order` describe a valid completion of `state`?
    ///
    /// True iff `order` is a permutation of all processes and each one,
    /// in turn, can proceed with the work released by its predecessors.
    pub fn is_valid_sequence(&self, state: &ResourceState, order: &[ProcessId]) -> bool {
        if order.len() != state.num_processes() {
            return false;
        }

        let mut work = initial_work(state);
        let mut seen = ProcessSet::new();

        for &p in order {
            if p.as_usize() >= state.num_processes() || seen.contains(p) {
                return false;
            }
            if !can_proceed(state.need(p), &work) {
                return false;
            }
            release_into(&mut work, state.allocation(p));
            seen.insert(p);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(available: Vec<u32>, max: Vec<Vec<u32>>, allocation: Vec<Vec<u32>>) -> ResourceState {
        ResourceState::new(available, max, allocation).unwrap()
    }

    #[test]
    fn test_finds_order_when_safe() {
        let s = state(
            vec![3, 3],
            vec![vec![3, 2], vec![2, 2]],
            vec![vec![1, 0], vec![0, 1]],
        );
        let validator = SequenceValidator::new();
        let seq = validator.find_safe_sequence(&s).unwrap();
        assert_eq!(seq.as_slice(), &[ProcessId(0), ProcessId(1)]);
        assert!(validator.is_valid_sequence(&s, seq.as_slice()));
        assert_eq!(seq.to_string(), "p0 -> p1");
    }

    #[test]
    fn test_none_when_deadlocked() {
        let s = state(
            vec![0, 0],
            vec![vec![2, 2], vec![2, 2]],
            vec![vec![1, 1], vec![1, 1]],
        );
        let outcome = SequenceValidator::new().search(&s);
        assert!(outcome.sequence.is_none());
        assert_eq!(outcome.stats.explored_nodes, 0);
    }

    #[test]
    fn test_safe_state_never_backtracks() {
        // Work only grows, so any runnable first choice extends to a full
        // order when one exists.
        //
        // available [1, 0]
        // p0: need [1, 0], alloc [0, 0]
        // p1: need [1, 0], alloc [0, 2]
        // p2: need [0, 2], alloc [1, 0]
        let s = state(
            vec![1, 0],
            vec![vec![1, 0], vec![1, 2], vec![1, 2]],
            vec![vec![0, 0], vec![0, 2], vec![1, 0]],
        );
        let validator = SequenceValidator::new();
        let outcome = validator.search(&s);
        let seq = outcome.sequence.unwrap();
        assert_eq!(seq.as_slice(), &[ProcessId(0), ProcessId(1), ProcessId(2)]);
        assert!(validator.is_valid_sequence(&s, seq.as_slice()));
        assert_eq!(outcome.stats.backtracks, 0);
        assert_eq!(outcome.stats.explored_nodes, 3);
    }

    #[test]
    fn test_exhaustive_failure_counts_backtracks() {
        // p0 and p1 can each finish, p2 never can
        let s = state(
            vec![1],
            vec![vec![1], vec![1], vec![9]],
            vec![vec![0], vec![0], vec![0]],
        );
        let outcome = SequenceValidator::new().search(&s);
        assert!(outcome.sequence.is_none());
        assert!(outcome.stats.backtracks > 0);
        assert_eq!(outcome.stats.max_depth, 2);
    }

    #[test]
    fn test_is_valid_sequence_rejects_bad_orders() {
        let s = state(
            vec![1],
            vec![vec![2], vec![1]],
            vec![vec![1], vec![0]],
        );
        let validator = SequenceValidator::new();
        // p0 needs 1, p1 needs 1: both orders valid
        assert!(validator.is_valid_sequence(&s, &[ProcessId(0), ProcessId(1)]));
        assert!(validator.is_valid_sequence(&s, &[ProcessId(1), ProcessId(0)]));
        // Duplicates, short orders and unknown ids are not
        assert!(!validator.is_valid_sequence(&s, &[ProcessId(0), ProcessId(0)]));
        assert!(!validator.is_valid_sequence(&s, &[ProcessId(0)]));
        assert!(!validator.is_valid_sequence(&s, &[ProcessId(0), ProcessId(7)]));
    }

    #[test]
    fn test_is_valid_sequence_checks_need() {
        let s = state(
            vec![0],
            vec![vec![1], vec![1]],
            vec![vec![1], vec![0]],
        );
        let validator = SequenceValidator::new();
        assert!(validator.is_valid_sequence(&s, &[ProcessId(0), ProcessId(1)]));
        assert!(!validator.is_valid_sequence(&s, &[ProcessId(1), ProcessId(0)]));
    }
}
