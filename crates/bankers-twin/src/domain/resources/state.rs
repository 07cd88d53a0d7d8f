//! ResourceState - Available / Max / Allocation / Need
//!
//! # Layout
//!
//! ```text
//! ResourceState
//!   ├─ available:  [Units; R]
//!   ├─ max:        [[Units; R]; P]   (fixed for the scenario)
//!   ├─ allocation: [[Units; R]; P]
//!   ├─ need:       [[Units; R]; P]   (co-mutated with allocation)
//!   └─ totals:     [u64; R]          (conservation baseline)
//! ```
//!
//! `need` is stored rather than recomputed so the safety algorithms can
//! borrow rows directly. Every mutation goes through [`apply_transfer`] or
//! [`revert_transfer`], which move the same vector between `available` and
//! one process's `allocation`/`need` in a single step.
//!
//! [`apply_transfer`]: ResourceState::apply_transfer
//! [`revert_transfer`]: ResourceState::revert_transfer

use super::types::{ProcessId, ResourceId, StateSpec, Units, MAX_PROCESSES};
use crate::domain::error::BankerError;
use serde::Serialize;

/// Resource allocation state of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceState {
    available: Vec<Units>,
    max: Vec<Vec<Units>>,
    allocation: Vec<Vec<Units>>,
    need: Vec<Vec<Units>>,
    #[serde(skip)]
    totals: Vec<u64>,
}

impl ResourceState {
    /// Build and validate an initial state
    ///
    /// P is `max.len()`, R is `available.len()`.
    ///
    /// # Errors
    ///
    /// - `ZeroDimension` if P or R is zero
    /// - `TooManyProcesses` if P exceeds [`MAX_PROCESSES`]
    /// - `ShapeMismatch` if any row disagrees with P or R
    /// - `AllocationExceedsMax` if any Allocation[p][r] > Max[p][r]
    pub fn new(
        available: Vec<Units>,
        max: Vec<Vec<Units>>,
        allocation: Vec<Vec<Units>>,
    ) -> Result<Self, BankerError> {
        let processes = max.len();
        let resources = available.len();

        if processes == 0 || resources == 0 {
            return Err(BankerError::ZeroDimension { processes, resources });
        }
        if processes > MAX_PROCESSES {
            return Err(BankerError::TooManyProcesses {
                processes,
                max: MAX_PROCESSES,
            });
        }
        if allocation.len() != processes {
            return Err(BankerError::ShapeMismatch {
                what: "allocation",
                expected: processes,
                actual: allocation.len(),
            });
        }
        for row in &max {
            if row.len() != resources {
                return Err(BankerError::ShapeMismatch {
                    what: "max row",
                    expected: resources,
                    actual: row.len(),
                });
            }
        }
        for row in &allocation {
            if row.len() != resources {
                return Err(BankerError::ShapeMismatch {
                    what: "allocation row",
                    expected: resources,
                    actual: row.len(),
                });
            }
        }

        let mut need = Vec::with_capacity(processes);
        for (p, (max_row, alloc_row)) in max.iter().zip(&allocation).enumerate() {
            let mut need_row = Vec::with_capacity(resources);
            for (r, (&m, &a)) in max_row.iter().zip(alloc_row).enumerate() {
                let n = m.checked_sub(a).ok_or(BankerError::AllocationExceedsMax {
                    process: ProcessId(p),
                    resource: ResourceId(r),
                    allocation: a,
                    max: m,
                })?;
                need_row.push(n);
            }
            need.push(need_row);
        }

        let totals = (0..resources)
            .map(|r| {
                u64::from(available[r])
                    + allocation.iter().map(|row| u64::from(row[r])).sum::<u64>()
            })
            .collect();

        Ok(Self {
            available,
            max,
            allocation,
            need,
            totals,
        })
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Read Access
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Number of processes (P)
    #[inline]
    pub fn num_processes(&self) -> usize {
        self.max.len()
    }

    /// Number of resource types (R)
    #[inline]
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    /// Iterator over all process ids in index order
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> {
        (0..self.num_processes()).map(ProcessId)
    }

    /// Unallocated units per resource type
    #[inline]
    pub fn available(&self) -> &[Units] {
        &self.available
    }

    /// Max row of `process`
    ///
    /// # Panics
    ///
    /// Panics if `process` is out of bounds.
    #[inline]
    pub fn max(&self, process: ProcessId) -> &[Units] {
        &self.max[process.as_usize()]
    }

    /// Allocation row of `process`
    ///
    /// # Panics
    ///
    /// Panics if `process` is out of bounds.
    #[inline]
    pub fn allocation(&self, process: ProcessId) -> &[Units] {
        &self.allocation[process.as_usize()]
    }

    /// Need row of `process`
    ///
    /// # Panics
    ///
    /// Panics if `process` is out of bounds.
    #[inline]
    pub fn need(&self, process: ProcessId) -> &[Units] {
        &self.need[process.as_usize()]
    }

    /// Whole Max matrix
    pub fn max_matrix(&self) -> &[Vec<Units>] {
        &self.max
    }

    /// Whole Allocation matrix
    pub fn allocation_matrix(&self) -> &[Vec<Units>] {
        &self.allocation
    }

    /// Whole Need matrix
    pub fn need_matrix(&self) -> &[Vec<Units>] {
        &self.need
    }

    /// Units of each resource type in circulation, fixed at construction
    pub fn totals(&self) -> &[u64] {
        &self.totals
    }

    /// Validate a process id against P
    pub fn check_process(&self, process: ProcessId) -> Result<(), BankerError> {
        if process.as_usize() < self.num_processes() {
            Ok(())
        } else {
            Err(BankerError::InvalidProcess {
                process,
                num_processes: self.num_processes(),
            })
        }
    }

    /// Validate a request vector length against R
    pub fn check_request_shape(&self, request: &[Units]) -> Result<(), BankerError> {
        if request.len() == self.num_resources() {
            Ok(())
        } else {
            Err(BankerError::RequestShape {
                expected: self.num_resources(),
                actual: request.len(),
            })
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Mutation Primitives
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Move `request` from Available into `process`'s Allocation
    ///
    /// Available -= request, Allocation[p] += request, Need[p] -= request.
    /// All components are validated before anything is written, so on error
    /// the state is untouched.
    ///
    /// # Errors
    ///
    /// - `InvalidProcess` / `RequestShape` for malformed arguments
    /// - `InvariantViolation` if any Available or Need component would go
    ///   negative
    pub fn apply_transfer(
        &mut self,
        process: ProcessId,
        request: &[Units],
    ) -> Result<(), BankerError> {
        self.check_process(process)?;
        self.check_request_shape(request)?;
        let p = process.as_usize();

        for (r, &amount) in request.iter().enumerate() {
            if amount > self.available[r] {
                return Err(BankerError::invariant(
                    "available_non_negative",
                    format!(
                        "transfer of {amount} {} to {process} exceeds available {}",
                        ResourceId(r),
                        self.available[r]
                    ),
                ));
            }
            if amount > self.need[p][r] {
                return Err(BankerError::invariant(
                    "need_non_negative",
                    format!(
                        "transfer of {amount} {} to {process} exceeds need {}",
                        ResourceId(r),
                        self.need[p][r]
                    ),
                ));
            }
        }

        for (r, &amount) in request.iter().enumerate() {
            self.available[r] -= amount;
            self.allocation[p][r] += amount;
            self.need[p][r] -= amount;
        }
        Ok(())
    }

    /// Exact inverse of [`apply_transfer`](Self::apply_transfer)
    ///
    /// # Errors
    ///
    /// - `InvalidProcess` / `RequestShape` for malformed arguments
    /// - `InvariantViolation` if Allocation[p] would go negative
    pub fn revert_transfer(
        &mut self,
        process: ProcessId,
        request: &[Units],
    ) -> Result<(), BankerError> {
        self.check_process(process)?;
        self.check_request_shape(request)?;
        let p = process.as_usize();

        for (r, &amount) in request.iter().enumerate() {
            if amount > self.allocation[p][r] {
                return Err(BankerError::invariant(
                    "allocation_non_negative",
                    format!(
                        "revert of {amount} {} from {process} exceeds allocation {}",
                        ResourceId(r),
                        self.allocation[p][r]
                    ),
                ));
            }
            if self.available[r].checked_add(amount).is_none() {
                return Err(BankerError::invariant(
                    "available_bounded",
                    format!("revert of {amount} {} overflows available", ResourceId(r)),
                ));
            }
        }

        for (r, &amount) in request.iter().enumerate() {
            self.available[r] += amount;
            self.allocation[p][r] -= amount;
            self.need[p][r] += amount;
        }
        Ok(())
    }
}

#[cfg(test)]
impl ResourceState {
    /// Raw row access for invariant-checker tests
    pub(crate) fn corrupt_need(&mut self, process: ProcessId, resource: ResourceId, value: Units) {
        self.need[process.as_usize()][resource.as_usize()] = value;
    }

    /// Raw availability access for invariant-checker tests
    pub(crate) fn corrupt_available(&mut self, resource: ResourceId, value: Units) {
        self.available[resource.as_usize()] = value;
    }
}

impl TryFrom<StateSpec> for ResourceState {
    type Error = BankerError;

    fn try_from(spec: StateSpec) -> Result<Self, Self::Error> {
        Self::new(spec.available, spec.max, spec.allocation)
    }
}

impl From<&ResourceState> for StateSpec {
    fn from(state: &ResourceState) -> Self {
        Self {
            available: state.available.clone(),
            max: state.max.clone(),
            allocation: state.allocation.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;

    fn scenario_one() -> ResourceState {
        ResourceState::new(
            vec![3, 3],
            vec![vec![3, 2], vec![2, 2]],
            vec![vec![1, 0], vec![0, 1]],
        )
        .unwrap()
    }

    #[test]
    fn test_need_is_derived() {
        let state = scenario_one();
        assert_eq!(state.need(ProcessId(0)), &[2, 2]);
        assert_eq!(state.need(ProcessId(1)), &[2, 1]);
        assert_eq!(state.totals(), &[4, 4]);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = ResourceState::new(vec![], vec![vec![]], vec![vec![]]).unwrap_err();
        assert!(matches!(err, BankerError::ZeroDimension { .. }));

        let err = ResourceState::new(vec![1], vec![], vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = ResourceState::new(vec![1, 1], vec![vec![1]], vec![vec![0]]).unwrap_err();
        assert!(matches!(err, BankerError::ShapeMismatch { what: "max row", .. }));

        let err =
            ResourceState::new(vec![1], vec![vec![1], vec![1]], vec![vec![0]]).unwrap_err();
        assert!(matches!(err, BankerError::ShapeMismatch { what: "allocation", .. }));
    }

    #[test]
    fn test_allocation_above_max_rejected() {
        let err = ResourceState::new(vec![0], vec![vec![1]], vec![vec![2]]).unwrap_err();
        assert_eq!(
            err,
            BankerError::AllocationExceedsMax {
                process: ProcessId(0),
                resource: ResourceId(0),
                allocation: 2,
                max: 1,
            }
        );
    }

    #[test]
    fn test_apply_then_revert_restores_state() {
        let mut state = scenario_one();
        let before = state.clone();

        state.apply_transfer(ProcessId(0), &[1, 1]).unwrap();
        assert_eq!(state.available(), &[2, 2]);
        assert_eq!(state.allocation(ProcessId(0)), &[2, 1]);
        assert_eq!(state.need(ProcessId(0)), &[1, 1]);
        assert_eq!(state.allocation(ProcessId(1)), before.allocation(ProcessId(1)));

        state.revert_transfer(ProcessId(0), &[1, 1]).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_beyond_available_is_invariant_violation() {
        let mut state = scenario_one();
        let before = state.clone();

        let err = state.apply_transfer(ProcessId(0), &[4, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(state, before);
    }

    #[test]
    fn test_apply_beyond_need_is_invariant_violation() {
        let mut state = scenario_one();
        let err = state.apply_transfer(ProcessId(1), &[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            BankerError::InvariantViolation { invariant: "need_non_negative", .. }
        ));
    }

    #[test]
    fn test_revert_beyond_allocation_is_invariant_violation() {
        let mut state = scenario_one();
        let before = state.clone();
        let err = state.revert_transfer(ProcessId(0), &[2, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(state, before);
    }

    #[test]
    fn test_bad_process_and_shape() {
        let mut state = scenario_one();
        assert!(matches!(
            state.apply_transfer(ProcessId(5), &[0, 0]),
            Err(BankerError::InvalidProcess { .. })
        ));
        assert!(matches!(
            state.apply_transfer(ProcessId(0), &[0]),
            Err(BankerError::RequestShape { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_state_spec_round_trip() {
        let state = scenario_one();
        let spec = StateSpec::from(&state);
        let rebuilt = ResourceState::try_from(spec).unwrap();
        assert_eq!(rebuilt, state);
    }
}
