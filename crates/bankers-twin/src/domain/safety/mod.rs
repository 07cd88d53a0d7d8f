//! Safety Analysis
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ SafetyChecker   │  (Greedy - fixed-point passes, O(P^2 * R))
//! ├─────────────────┤
//! │ - work          │  Simulated free pool
//! │ - finished      │  ProcessSet
//! └─────────────────┘
//!
//! ┌───────────────────┐
//! │ SequenceValidator │  (Oracle - explicit-stack DFS, O(P!))
//! ├───────────────────┤
//! │ - work_arena      │  Work snapshot per depth
//! │ - cursor          │  Next candidate per depth
//! │ - order           │  Current path
//! └───────────────────┘
//! ```
//!
//! Both go through [`can_proceed`] and [`release_into`]. The core guarantee
//! is that the checker calls a state safe iff the search finds an order;
//! [`cross_check`] enforces it at runtime and the Kani harnesses in
//! `proof.rs` prove it for small bounds.

pub mod checker;
pub mod oracle;
pub mod predicate;
pub mod sequence;

#[cfg(kani)]
pub mod proof;

// Re-exports
pub use checker::{SafetyChecker, SafetyVerdict};
pub use oracle::{assess, cross_check, CrossCheck, SafetyOracle, MAX_ORACLE_PROCESSES};
pub use predicate::{can_proceed, initial_work, release_into, ProcessSet, Work};
pub use sequence::{SafeSequence, SearchOutcome, SearchStats, SequenceValidator};
