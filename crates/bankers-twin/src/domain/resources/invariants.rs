//! Runtime-checkable state invariants
//!
//! These hold after every mutation of a [`ResourceState`]:
//!
//! 1. **allocation_bounded**: Allocation[p][r] <= Max[p][r]
//! 2. **need_consistent**: Need[p][r] == Max[p][r] - Allocation[p][r]
//! 3. **conservation**: Available[r] + sum_p Allocation[p][r] == totals[r]
//!
//! Non-negativity of every component is guaranteed by the unsigned
//! [`Units`](super::Units) type and the checked mutation primitives.

use super::state::ResourceState;
use super::types::{ProcessId, ResourceId};
use crate::domain::error::BankerError;

/// An invariant violation with details
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Name of the violated invariant
    pub invariant: &'static str,
    /// Description of what went wrong
    pub description: String,
}

impl From<InvariantViolation> for BankerError {
    fn from(v: InvariantViolation) -> Self {
        BankerError::InvariantViolation {
            invariant: v.invariant,
            detail: v.description,
        }
    }
}

/// Check all state invariants.
///
/// Returns a list of violations (empty if all invariants hold).
pub fn check_all_invariants(state: &ResourceState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    violations.extend(check_allocation_bounded(state));
    violations.extend(check_need_consistent(state));
    violations.extend(check_conservation(state));

    violations
}

/// Fail with the first violation, if any
pub fn verify_invariants(state: &ResourceState) -> Result<(), BankerError> {
    match check_all_invariants(state).into_iter().next() {
        Some(violation) => {
            tracing::error!(
                invariant = violation.invariant,
                "{}",
                violation.description
            );
            Err(violation.into())
        }
        None => Ok(()),
    }
}

fn check_allocation_bounded(state: &ResourceState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for p in state.processes() {
        for (r, (&a, &m)) in state.allocation(p).iter().zip(state.max(p)).enumerate() {
            if a > m {
                violations.push(InvariantViolation {
                    invariant: "allocation_bounded",
                    description: format!(
                        "{p} holds {a} of {} but declared max {m}",
                        ResourceId(r)
                    ),
                });
            }
        }
    }

    violations
}

fn check_need_consistent(state: &ResourceState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for p in state.processes() {
        for r in 0..state.num_resources() {
            let expected = state.max(p)[r].checked_sub(state.allocation(p)[r]);
            let actual = state.need(p)[r];
            if expected != Some(actual) {
                violations.push(InvariantViolation {
                    invariant: "need_consistent",
                    description: need_mismatch(p, ResourceId(r), actual, expected),
                });
            }
        }
    }

    violations
}

fn need_mismatch(
    p: ProcessId,
    r: ResourceId,
    actual: super::Units,
    expected: Option<super::Units>,
) -> String {
    match expected {
        Some(e) => format!("need[{p}][{r}] is {actual}, max - allocation is {e}"),
        None => format!("need[{p}][{r}] is {actual}, max - allocation is negative"),
    }
}

fn check_conservation(state: &ResourceState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (r, &total) in state.totals().iter().enumerate() {
        let held: u64 = state
            .allocation_matrix()
            .iter()
            .map(|row| u64::from(row[r]))
            .sum();
        let in_circulation = u64::from(state.available()[r]) + held;
        if in_circulation != total {
            violations.push(InvariantViolation {
                invariant: "conservation",
                description: format!(
                    "{} in circulation is {in_circulation}, expected {total}",
                    ResourceId(r)
                ),
            });
        }
    }

    violations
}
