//! ScenarioRunner - Builds a state from a value source and drives requests
//!
//! # Draw Order
//!
//! ```text
//! for r in 0..R:            Available[r]     in [0, max_units]
//! for p in 0..P:
//!     for r in 0..R:        Max[p][r]        in [0, max_units]
//!                           Allocation[p][r] in [0, Max[p][r]]
//! repeat `requests` times:
//!     process                                 in [0, P - 1]
//!     for r in 0..R:        request[r]       in [0, Need[p][r]]  (0 when Need is 0)
//! ```
//!
//! The order is part of the contract: scripted sources replay against it.

use super::config::ScenarioConfig;
use super::report::{ScenarioReport, StepReport};
use crate::domain::arbiter::{ArbiterObserver, RequestArbiter};
use crate::domain::error::BankerError;
use crate::domain::resources::{verify_invariants, ProcessId, ResourceState, Units};
use crate::domain::safety::{cross_check, SafeSequence, SafetyChecker, SafetyOracle};
use crate::domain::source::ValueSource;

/// Draw an initial state from `source`
///
/// # Errors
///
/// - Configuration errors from [`ScenarioConfig::validate`]
/// - Whatever the source reports
pub fn generate_state<V: ValueSource + ?Sized>(
    config: &ScenarioConfig,
    source: &mut V,
) -> Result<ResourceState, BankerError> {
    config.validate()?;

    let available = (0..config.resources)
        .map(|_| source.choose_int(0, config.max_units))
        .collect::<Result<Vec<_>, _>>()?;

    let mut max = Vec::with_capacity(config.processes);
    let mut allocation = Vec::with_capacity(config.processes);
    for _ in 0..config.processes {
        let mut max_row = Vec::with_capacity(config.resources);
        let mut alloc_row = Vec::with_capacity(config.resources);
        for _ in 0..config.resources {
            let m = source.choose_int(0, config.max_units)?;
            max_row.push(m);
            alloc_row.push(source.choose_int(0, m)?);
        }
        max.push(max_row);
        allocation.push(alloc_row);
    }

    ResourceState::new(available, max, allocation)
}

/// Drives one scenario at a time
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Create a runner for a validated configuration
    pub fn new(config: ScenarioConfig) -> Result<Self, BankerError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration
    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Run one scenario with a default arbiter
    pub fn run<V: ValueSource + ?Sized>(&self, source: &mut V) -> Result<ScenarioReport, BankerError> {
        self.run_with(source, &mut RequestArbiter::new())
    }

    /// Run one scenario through a caller-supplied arbiter
    ///
    /// # Errors
    ///
    /// Any error aborts the scenario. `OracleMismatch` and
    /// `InvariantViolation` are fatal for the whole run.
    pub fn run_with<V, O, S>(
        &self,
        source: &mut V,
        arbiter: &mut RequestArbiter<O, S>,
    ) -> Result<ScenarioReport, BankerError>
    where
        V: ValueSource + ?Sized,
        O: ArbiterObserver,
        S: SafetyOracle,
    {
        let mut state = generate_state(&self.config, source)?;
        verify_invariants(&state)?;

        let initial = state.clone();
        let (initial_safe, safe_sequence) = self.classify(&state)?;

        let mut steps = Vec::with_capacity(self.config.requests);
        for step in 1..=self.config.requests {
            // P <= MAX_PROCESSES, checked by validate()
            let last = (self.config.processes - 1) as Units;
            let process = ProcessId(source.choose_int(0, last)? as usize);

            let request = state
                .need(process)
                .iter()
                .map(|&need| if need == 0 { Ok(0) } else { source.choose_int(0, need) })
                .collect::<Result<Vec<_>, _>>()?;

            let decision = arbiter.request(&mut state, process, &request)?;
            verify_invariants(&state)?;
            let (safe_after, _) = self.classify(&state)?;

            tracing::debug!(step, %process, ?request, %decision, safe_after, "scenario step");

            steps.push(StepReport {
                step,
                process,
                request,
                decision,
                safe_after,
            });
        }

        let report = ScenarioReport {
            initial,
            initial_safe,
            safe_sequence,
            steps,
            final_state: state,
        };
        tracing::trace!(
            initial_safe,
            granted = report.granted(),
            denied = report.denied(),
            "scenario complete"
        );
        Ok(report)
    }

    /// Safety verdict, cross-checked when enabled
    fn classify(&self, state: &ResourceState) -> Result<(bool, Option<SafeSequence>), BankerError> {
        if self.config.cross_check {
            let check = cross_check(state)?;
            Ok((check.safe, check.sequence))
        } else {
            Ok((SafetyChecker::new().is_safe(state), None))
        }
    }
}
