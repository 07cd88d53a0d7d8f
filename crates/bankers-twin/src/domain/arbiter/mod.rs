//! Request Arbitration
//!
//! # Architecture
//!
//! ```text
//! arbiter/
//! ├── types.rs     Decision, DenialReason
//! ├── observer.rs  ArbiterObserver, NoOpObserver, RecordingObserver
//! ├── protocol.rs  RequestArbiter<O, S>
//! └── shared.rs    SharedBanker (Arc<Mutex<..>> handle)
//! ```
//!
//! ## Zero-Cost Abstraction
//!
//! - **Default** `RequestArbiter<NoOpObserver, SafetyChecker>`
//!   - Observer hooks inline to nothing
//!   - Greedy O(P^2 * R) safety check
//!
//! - **Verification** `RequestArbiter<RecordingObserver, SequenceValidator>`
//!   - Every protocol step recorded
//!   - Decisions backed by the exhaustive search

pub mod observer;
pub mod protocol;
pub mod shared;
pub mod types;

// Re-exports
pub use observer::{ArbiterEvent, ArbiterObserver, NoOpObserver, RecordingObserver};
pub use protocol::RequestArbiter;
pub use shared::SharedBanker;
pub use types::{Decision, DenialReason};
