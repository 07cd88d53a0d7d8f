//! Infrastructure Layer - External Technology Stack
//!
//! Concrete implementations that touch the file system or encode data.
//!
//! # Responsibilities
//! - Loading `ScenarioConfig` and `StateSpec` documents (JSON)
//! - Encoding reports and summaries for output

pub mod error;
pub mod persistence;
pub mod serialization;

// Re-exports
pub use error::InfraError;
pub use persistence::{load_scenario_config, load_state, save_state};
pub use serialization::{encode_json, encode_report};
