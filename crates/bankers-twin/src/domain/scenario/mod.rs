//! Scenario Driver
//!
//! # Architecture
//!
//! ```text
//! ScenarioConfig ──► ScenarioRunner::run(source)
//!                      ├─ generate_state      (draws from the ValueSource)
//!                      ├─ verify_invariants
//!                      ├─ cross_check         (initial verdict + order)
//!                      └─ requests x N
//!                           ├─ draw process and request
//!                           ├─ RequestArbiter::request
//!                           ├─ verify_invariants
//!                           └─ cross_check
//!                    ──► ScenarioReport
//! ```

pub mod config;
pub mod report;
pub mod runner;

// Re-exports
pub use config::ScenarioConfig;
pub use report::{ScenarioReport, StepReport};
pub use runner::{generate_state, ScenarioRunner};
