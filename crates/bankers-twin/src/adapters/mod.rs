//! Adapters Layer - Ports & Adapters Pattern
//!
//! Drivers that connect an external choice strategy to the domain.
//!
//! # Hexagonal Architecture
//! - Inbound: `ExhaustiveSource` choices → `ScenarioRunner`
//! - Outbound: `ScenarioReport` → caller-supplied visitor

pub mod explorer;

// Re-exports
pub use explorer::{ExplorationSummary, Explorer};
