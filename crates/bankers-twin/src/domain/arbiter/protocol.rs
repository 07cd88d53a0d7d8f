//! RequestArbiter - Optimistic apply, verify, rollback
//!
//! # Protocol
//!
//! ```text
//! 1. request[r] > Available[r] for some r  ->  Denied(Infeasible), no mutation
//! 2. request[r] > Need[p][r] for some r     ->  Err(RequestExceedsNeed)
//! 3. apply_transfer(p, request)                (tentative grant)
//! 4. safe := oracle.is_safe(state)
//! 5. safe                                  ->  Granted, mutation kept
//! 6. !safe  ->  revert_transfer(p, request) ->  Denied(Unsafe), state restored
//! ```
//!
//! The state is borrowed mutably for the whole call, so exactly one
//! arbitration can be in flight per `ResourceState`. For shared use across
//! threads see [`SharedBanker`](super::SharedBanker).
//!
//! # Preconditions
//!
//! An unknown process or a vector of the wrong length is a `Usage` error
//! before step 1. A request that exceeds Available is always denied, even
//! when it also exceeds the process's remaining Need.

use super::observer::{ArbiterObserver, NoOpObserver};
use super::types::{Decision, DenialReason};
use crate::domain::error::BankerError;
use crate::domain::resources::{ProcessId, ResourceId, ResourceState, Units};
use crate::domain::safety::{SafetyChecker, SafetyOracle};

/// Arbitrates resource requests against a [`ResourceState`]
///
/// # Type Parameters
///
/// - `O`: [`ArbiterObserver`] ([`NoOpObserver`] by default)
/// - `S`: [`SafetyOracle`] deciding step 3 ([`SafetyChecker`] by default)
#[derive(Debug, Clone, Default)]
pub struct RequestArbiter<O = NoOpObserver, S = SafetyChecker> {
    observer: O,
    oracle: S,
}

impl RequestArbiter {
    /// Arbiter with the greedy checker and no observer
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ArbiterObserver, S: SafetyOracle> RequestArbiter<O, S> {
    /// Arbiter with an explicit observer and oracle
    pub fn with_parts(observer: O, oracle: S) -> Self {
        Self { observer, oracle }
    }

    /// Replace the observer, keeping the oracle
    pub fn with_observer<O2: ArbiterObserver>(self, observer: O2) -> RequestArbiter<O2, S> {
        RequestArbiter {
            observer,
            oracle: self.oracle,
        }
    }

    /// Replace the oracle, keeping the observer
    pub fn with_oracle<S2: SafetyOracle>(self, oracle: S2) -> RequestArbiter<O, S2> {
        RequestArbiter {
            observer: self.observer,
            oracle,
        }
    }

    /// The observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the arbiter, returning its observer
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// The safety oracle
    pub fn oracle(&self) -> &S {
        &self.oracle
    }

    /// Arbitrate one request as a single transaction
    ///
    /// # Errors
    ///
    /// - `InvalidProcess`, `RequestShape` or `RequestExceedsNeed` for a
    ///   malformed request (state untouched)
    /// - `InvariantViolation` if a mutation primitive trips, which means the
    ///   pre-checks above are wrong. The rollback cannot trip after a
    ///   successful apply of the same vector (`proof_apply_revert_roundtrip`);
    ///   if it ever did, the tentative grant stays applied and the state
    ///   must be discarded, like after any fatal error.
    pub fn request(
        &mut self,
        state: &mut ResourceState,
        process: ProcessId,
        request: &[Units],
    ) -> Result<Decision, BankerError> {
        state.check_process(process)?;
        state.check_request_shape(request)?;

        let infeasible = infeasibility(state, request);
        if infeasible.is_none() {
            check_within_need(state, process, request)?;
        }

        self.observer.on_request(process, request);

        if let Some(reason) = infeasible {
            self.observer.on_denied(process, reason);
            tracing::debug!(%process, ?request, %reason, "request denied at pre-check");
            return Ok(Decision::Denied(reason));
        }

        state.apply_transfer(process, request)?;
        self.observer.on_applied(process, request);

        let safe = self.oracle.is_safe(state);
        self.observer.on_verdict(process, safe);

        if safe {
            self.observer.on_commit(process);
            tracing::debug!(%process, ?request, oracle = self.oracle.name(), "request granted");
            Ok(Decision::Granted)
        } else {
            state.revert_transfer(process, request)?;
            self.observer.on_rollback(process);
            tracing::warn!(%process, ?request, oracle = self.oracle.name(), "unsafe request rolled back");
            Ok(Decision::Denied(DenialReason::Unsafe))
        }
    }

    /// Boolean form of [`request`](Self::request)
    pub fn request_granted(
        &mut self,
        state: &mut ResourceState,
        process: ProcessId,
        request: &[Units],
    ) -> Result<bool, BankerError> {
        self.request(state, process, request)
            .map(|decision| decision.is_granted())
    }
}

fn check_within_need(
    state: &ResourceState,
    process: ProcessId,
    request: &[Units],
) -> Result<(), BankerError> {
    for (r, (&requested, &need)) in request.iter().zip(state.need(process)).enumerate() {
        if requested > need {
            return Err(BankerError::RequestExceedsNeed {
                process,
                resource: ResourceId(r),
                requested,
                need,
            });
        }
    }
    Ok(())
}

/// First component that exceeds Available, if any
fn infeasibility(state: &ResourceState, request: &[Units]) -> Option<DenialReason> {
    request
        .iter()
        .zip(state.available())
        .enumerate()
        .find(|(_, (&requested, &available))| requested > available)
        .map(|(r, (&requested, &available))| DenialReason::Infeasible {
            resource: ResourceId(r),
            requested,
            available,
        })
}
