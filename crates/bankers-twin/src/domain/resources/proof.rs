//! Kani Formal Verification Proofs for ResourceState

use super::invariants::check_all_invariants;
use super::state::ResourceState;
use super::types::{ProcessId, Units};

const BOUND: Units = 3;

fn any_units(high: Units) -> Units {
    let v: Units = kani::any();
    kani::assume(v <= high);
    v
}

/// P = 2, R = 2 with every component in [0, 3]
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

/// Apply followed by revert restores the state bit-for-bit
#[kani::proof]
#[kani::unwind(4)]
fn proof_apply_revert_roundtrip() {
    let mut state = any_state();
    let before = state.clone();

    let p = ProcessId(if kani::any() { 1 } else { 0 });
    let request = [any_units(BOUND), any_units(BOUND)];

    if state.apply_transfer(p, &request).is_ok() {
        kani::assert(
            check_all_invariants(&state).is_empty(),
            "invariants hold after apply"
        );
        let reverted = state.revert_transfer(p, &request);
        kani::assert(reverted.is_ok(), "revert of an applied transfer succeeds");
        kani::assert(state == before, "revert restores state");
    } else {
        kani::assert(state == before, "failed apply leaves state untouched");
    }
}

/// A successful apply moves exactly the request vector
#[kani::proof]
#[kani::unwind(4)]
fn proof_apply_is_exact() {
    let mut state = any_state();
    let before = state.clone();
    let request = [any_units(BOUND), any_units(BOUND)];
    let p = ProcessId(0);
    let other = ProcessId(1);

    if state.apply_transfer(p, &request).is_ok() {
        for r in 0..2 {
            kani::assert(
                state.available()[r] + request[r] == before.available()[r],
                "available decremented"
            );
            kani::assert(
                state.allocation(p)[r] == before.allocation(p)[r] + request[r],
                "allocation incremented"
            );
            kani::assert(
                state.need(p)[r] + request[r] == before.need(p)[r],
                "need decremented"
            );
        }
        kani::assert(
            state.allocation(other) == before.allocation(other),
            "other rows untouched"
        );
    }
}
