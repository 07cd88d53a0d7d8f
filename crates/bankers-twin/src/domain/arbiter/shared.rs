//! SharedBanker - Thread-safe handle around one state and its arbiter
//!
//! # Memory Layout
//!
//! ```text
//! SharedBanker (Clone = Arc clone)
//! └─ inner: Arc<Mutex<Inner>>
//!     ├─ state:   ResourceState
//!     └─ arbiter: RequestArbiter<O, S>
//! ```
//!
//! The lock is held across the whole apply / check / rollback sequence, so
//! no other caller can observe or mutate the tentative state.

use super::observer::{ArbiterObserver, NoOpObserver};
use super::protocol::RequestArbiter;
use super::types::Decision;
use crate::domain::error::BankerError;
use crate::domain::resources::{ProcessId, ResourceState, Units};
use crate::domain::safety::{SafetyChecker, SafetyOracle};
use parking_lot::Mutex;
use std::sync::Arc;

struct Inner<O, S> {
    state: ResourceState,
    arbiter: RequestArbiter<O, S>,
}

/// Cloneable, lock-protected banker
pub struct SharedBanker<O = NoOpObserver, S = SafetyChecker> {
    inner: Arc<Mutex<Inner<O, S>>>,
}

impl<O, S> Clone for SharedBanker<O, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedBanker {
    /// Wrap `state` with a default arbiter
    pub fn new(state: ResourceState) -> Self {
        Self::with_arbiter(state, RequestArbiter::new())
    }
}

impl<O: ArbiterObserver, S: SafetyOracle> SharedBanker<O, S> {
    /// Wrap `state` with a configured arbiter
    pub fn with_arbiter(state: ResourceState, arbiter: RequestArbiter<O, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { state, arbiter })),
        }
    }

    /// Arbitrate one request under the lock
    pub fn request(&self, process: ProcessId, request: &[Units]) -> Result<Decision, BankerError> {
        let mut guard = self.inner.lock();
        let Inner { state, arbiter } = &mut *guard;
        arbiter.request(state, process, request)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ResourceState {
        self.inner.lock().state.clone()
    }

    /// Run `f` against the current state while holding the lock
    pub fn with_state<R>(&self, f: impl FnOnce(&ResourceState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    /// Run `f` against the observer while holding the lock
    pub fn with_observer<R>(&self, f: impl FnOnce(&O) -> R) -> R {
        f(self.inner.lock().arbiter.observer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arbiter::RecordingObserver;
    use crate::domain::resources::verify_invariants;
    use std::thread;

    #[test]
    fn test_concurrent_requests_keep_invariants() {
        let state = ResourceState::new(
            vec![6, 6],
            vec![vec![3, 3], vec![3, 3], vec![3, 3], vec![3, 3]],
            vec![vec![0, 0], vec![0, 0], vec![0, 0], vec![0, 0]],
        )
        .unwrap();
        let banker = SharedBanker::new(state);

        let handles: Vec<_> = (0..4)
            .map(|p| {
                let banker = banker.clone();
                thread::spawn(move || {
                    for _ in 0..3 {
                        let need = banker.with_state(|s| s.need(ProcessId(p)).to_vec());
                        let request: Vec<Units> = need.iter().map(|&n| n.min(1)).collect();
                        banker.request(ProcessId(p), &request).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let end = banker.snapshot();
        assert!(verify_invariants(&end).is_ok());
        assert!(SafetyChecker::new().is_safe(&end));
    }

    #[test]
    fn test_observer_visible_through_handle() {
        let state = ResourceState::new(vec![1], vec![vec![1]], vec![vec![0]]).unwrap();
        let arbiter = RequestArbiter::new().with_observer(RecordingObserver::new());
        let banker = SharedBanker::with_arbiter(state, arbiter);

        assert!(banker.request(ProcessId(0), &[1]).unwrap().is_granted());
        assert_eq!(banker.with_observer(|o| o.applied_count()), 1);
        assert_eq!(banker.snapshot().available(), &[0]);
    }
}
