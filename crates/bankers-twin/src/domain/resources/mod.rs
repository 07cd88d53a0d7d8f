//! Resource Accounting
//!
//! # Architecture
//!
//! ```text
//! resources/
//! ├── types.rs       ProcessId, ResourceId, Units, StateSpec
//! ├── state.rs       ResourceState (Available / Max / Allocation / Need)
//! ├── invariants.rs  Runtime-checkable invariants
//! └── proof.rs       Kani harnesses (cfg(kani))
//! ```
//!
//! `ResourceState` owns the four arrays and exposes exactly one pair of
//! mutation primitives:
//!
//! ```text
//! apply_transfer(p, v)   Available -= v, Allocation[p] += v, Need[p] -= v
//! revert_transfer(p, v)  Available += v, Allocation[p] -= v, Need[p] += v
//! ```
//!
//! Both validate every component before writing anything, so a failing call
//! leaves the state untouched.

pub mod invariants;
pub mod state;
pub mod types;

#[cfg(kani)]
pub mod proof;

// Re-exports
pub use invariants::{check_all_invariants, verify_invariants, InvariantViolation};
pub use state::ResourceState;
pub use types::*;
