//! Shared building blocks of both safety algorithms
//!
//! The greedy checker and the search oracle must agree on when a process
//! can run to completion. They both go through [`can_proceed`] and
//! [`release_into`], so the two can never drift apart on that predicate.

use crate::domain::resources::{ProcessId, ResourceState, Units};
use std::fmt;

/// Simulated free pool during a safety simulation
///
/// Widened to `u64` so releasing every allocation back into the pool can
/// never overflow.
pub type Work = Vec<u64>;

/// Seed a work vector from Available
pub fn initial_work(state: &ResourceState) -> Work {
    state.available().iter().map(|&a| u64::from(a)).collect()
}

/// Can a process with remaining `need_row` finish given `work`?
///
/// True iff `need_row[r] <= work[r]` for every resource type.
#[inline]
pub fn can_proceed(need_row: &[Units], work: &[u64]) -> bool {
    need_row
        .iter()
        .zip(work)
        .all(|(&need, &free)| u64::from(need) <= free)
}

/// Simulate completion: the process returns everything it holds
#[inline]
pub fn release_into(work: &mut [u64], allocation_row: &[Units]) {
    for (free, &held) in work.iter_mut().zip(allocation_row) {
        *free += u64::from(held);
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProcessSet
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Finished-set backed by a single u64
///
/// # Design
///
/// - **Capacity:** 64 processes ([`MAX_PROCESSES`](crate::domain::resources::MAX_PROCESSES))
/// - **Storage:** Single u64 on stack/register
/// - **Copy:** snapshots are register copies, not heap clones
///
/// ```text
/// insert(3):     bits |= (1 << 3)
/// remove(3):     bits &= !(1 << 3)
/// contains(3):   bits & (1 << 3)
/// is_full(n):    bits == (1 << n) - 1
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Default, Hash)]
pub struct ProcessSet {
    bits: u64,
}

impl ProcessSet {
    /// Create a new empty set
    #[inline(always)]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Insert a process
    ///
    /// # Panics
    ///
    /// Panics if the index is `>= 64`
    #[inline(always)]
    pub fn insert(&mut self, process: ProcessId) {
        self.bits |= Self::mask(process);
    }

    /// Remove a process
    ///
    /// # Panics
    ///
    /// Panics if the index is `>= 64`
    #[inline(always)]
    pub fn remove(&mut self, process: ProcessId) {
        self.bits &= !Self::mask(process);
    }

    /// Check membership
    ///
    /// # Panics
    ///
    /// Panics if the index is `>= 64`
    #[inline(always)]
    pub fn contains(&self, process: ProcessId) -> bool {
        self.bits & Self::mask(process) != 0
    }

    /// Number of members
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Check if the set is empty
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Do the members cover every process in `0..num_processes`?
    #[inline]
    pub fn is_full(&self, num_processes: usize) -> bool {
        self.len() == num_processes
    }

    /// Processes in `0..num_processes` that are *not* members
    pub fn complement(&self, num_processes: usize) -> Vec<ProcessId> {
        (0..num_processes)
            .map(ProcessId)
            .filter(|&p| !self.contains(p))
            .collect()
    }

    #[inline(always)]
    fn mask(process: ProcessId) -> u64 {
        let idx = process.as_usize();
        assert!(idx < 64, "Index out of bounds: {}", idx);
        1u64 << idx
    }
}

impl fmt::Debug for ProcessSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessSet({:#018x})", self.bits)
    }
}
