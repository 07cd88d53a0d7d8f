//! SafetyOracle Trait - Common Interface
//!
//! Both safety algorithms answer the same question. The arbiter is generic
//! over this trait so verification runs can swap the greedy checker for the
//! exhaustive search, and [`cross_check`] runs both and demands agreement.
//!
//! The search is O(P!) on states where most processes can finish but one
//! cannot, so [`cross_check`] refuses states above [`MAX_ORACLE_PROCESSES`].
//! [`assess`] falls back to the greedy verdict alone for those.

use super::checker::SafetyChecker;
use super::sequence::{SafeSequence, SequenceValidator};
use crate::domain::error::BankerError;
use crate::domain::resources::ResourceState;

/// Largest process count the search oracle is run on
pub const MAX_ORACLE_PROCESSES: usize = 10;

/// Safety decision interface
pub trait SafetyOracle {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Is `state` safe?
    fn is_safe(&self, state: &ResourceState) -> bool;
}

impl SafetyOracle for SafetyChecker {
    fn name(&self) -> &'static str {
        "greedy"
    }

    #[inline]
    fn is_safe(&self, state: &ResourceState) -> bool {
        SafetyChecker::is_safe(self, state)
    }
}

impl SafetyOracle for SequenceValidator {
    fn name(&self) -> &'static str {
        "search"
    }

    fn is_safe(&self, state: &ResourceState) -> bool {
        self.find_safe_sequence(state).is_some()
    }
}

/// Agreed verdict of both algorithms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossCheck {
    /// Shared verdict
    pub safe: bool,
    /// Completion order, present iff `safe` and the search ran
    pub sequence: Option<SafeSequence>,
}

/// Run the checker and the search oracle and require agreement
///
/// # Errors
///
/// `OracleMismatch` in either direction: the checker calls the state safe
/// while the search finds no order, or the search finds an order the
/// checker missed.
///
/// `OracleTooLarge` if P exceeds [`MAX_ORACLE_PROCESSES`].
pub fn cross_check(state: &ResourceState) -> Result<CrossCheck, BankerError> {
    if state.num_processes() > MAX_ORACLE_PROCESSES {
        return Err(BankerError::OracleTooLarge {
            processes: state.num_processes(),
            max: MAX_ORACLE_PROCESSES,
        });
    }

    let safe = SafetyChecker::new().is_safe(state);
    let sequence = SequenceValidator::new().find_safe_sequence(state);

    if safe != sequence.is_some() {
        tracing::error!(
            checker_safe = safe,
            sequence_found = sequence.is_some(),
            available = ?state.available(),
            allocation = ?state.allocation_matrix(),
            need = ?state.need_matrix(),
            "safety oracle mismatch"
        );
        return Err(BankerError::OracleMismatch {
            checker_safe: safe,
            sequence_found: sequence.is_some(),
        });
    }

    Ok(CrossCheck { safe, sequence })
}

/// [`cross_check`] when P is small enough, otherwise the greedy verdict
/// with no sequence
pub fn assess(state: &ResourceState) -> Result<CrossCheck, BankerError> {
    if state.num_processes() <= MAX_ORACLE_PROCESSES {
        return cross_check(state);
    }
    tracing::debug!(
        processes = state.num_processes(),
        max = MAX_ORACLE_PROCESSES,
        "search oracle skipped"
    );
    Ok(CrossCheck {
        safe: SafetyChecker::new().is_safe(state),
        sequence: None,
    })
}
