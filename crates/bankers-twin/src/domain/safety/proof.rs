//! Kani Formal Verification Proofs for Safety Analysis
//!
//! # Bounds
//!
//! P = 2, R = 2, every Max component in [0, 3], Allocation[p][r] in
//! [0, Max[p][r]], Available[r] in [0, 3]. The harnesses are exhaustive
//! over that space.

use super::checker::SafetyChecker;
use super::predicate::{can_proceed, ProcessSet};
use super::sequence::SequenceValidator;
use crate::domain::resources::{ProcessId, ResourceState, Units};

const BOUND: Units = 3;

fn any_units(high: Units) -> Units {
    let v: Units = kani::any();
    kani::assume(v <= high);
    v
}

fn any_state() -> ResourceState {
    let available = vec![any_units(BOUND), any_units(BOUND)];
    let mut max = Vec::with_capacity(2);
    let mut allocation = Vec::with_capacity(2);
    for _ in 0..2 {
        let m0 = any_units(BOUND);
        let m1 = any_units(BOUND);
        allocation.push(vec![any_units(m0), any_units(m1)]);
        max.push(vec![m0, m1]);
    }
    match ResourceState::new(available, max, allocation) {
        Ok(state) => state,
        Err(_) => {
            kani::assume(false);
            unreachable!()
        }
    }
}

// ============================================================================
// Predicate Proofs
// ============================================================================

/// `can_proceed` is component-wise `<=`
#[kani::proof]
fn proof_can_proceed_componentwise() {
    let need = [any_units(BOUND), any_units(BOUND)];
    let work = [u64::from(any_units(BOUND)), u64::from(any_units(BOUND))];

    let expected = u64::from(need[0]) <= work[0] && u64::from(need[1]) <= work[1];
    kani::assert(can_proceed(&need, &work) == expected, "componentwise <=");
}

/// ProcessSet insert/remove are inverse on a single bit
#[kani::proof]
fn proof_process_set_insert_remove() {
    let idx: usize = kani::any();
    kani::assume(idx < 64);
    let p = ProcessId(idx);

    let mut set = ProcessSet::new();
    set.insert(p);
    kani::assert(set.contains(p), "inserted member present");
    kani::assert(set.len() == 1, "exactly one member");
    set.remove(p);
    kani::assert(set.is_empty(), "removal restores empty set");
}

// ============================================================================
// Checker / Search Agreement
// ============================================================================

/// Greedy verdict and search result agree on every bounded state
#[kani::proof]
#[kani::unwind(6)]
fn proof_checker_agrees_with_search() {
    let state = any_state();

    let safe = SafetyChecker::new().is_safe(&state);
    let sequence = SequenceValidator::new().find_safe_sequence(&state);

    kani::assert(safe == sequence.is_some(), "checker and search agree");
}

/// Any order the search returns is a valid completion order
#[kani::proof]
#[kani::unwind(6)]
fn proof_search_result_is_valid() {
    let state = any_state();
    let validator = SequenceValidator::new();

    if let Some(seq) = validator.find_safe_sequence(&state) {
        kani::assert(
            validator.is_valid_sequence(&state, seq.as_slice()),
            "returned order replays"
        );
    }
}
