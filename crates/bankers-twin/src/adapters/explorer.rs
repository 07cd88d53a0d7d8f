//! Explorer - Exhaustive scenario enumeration
//!
//! # Overview
//!
//! Feeds an [`ExhaustiveSource`] into [`ScenarioRunner`] until every choice
//! path has been visited, or until `scenario_limit` is reached.
//!
//! ```text
//! loop
//!     report := runner.run(source)    error -> halt immediately
//!     summary.record(report)
//!     visit(report)
//!     source.advance() or stop
//! ```
//!
//! Errors are never skipped over. An `OracleMismatch` in scenario 10 must
//! not be buried under 10,000 clean scenarios that follow it.

use crate::domain::arbiter::{DenialReason, RequestArbiter};
use crate::domain::error::BankerError;
use crate::domain::scenario::{ScenarioConfig, ScenarioReport, ScenarioRunner};
use crate::domain::source::ExhaustiveSource;
use serde::Serialize;
use std::fmt;

/// Aggregate counts over an exploration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExplorationSummary {
    /// Scenarios run to completion
    pub scenarios: usize,
    /// Scenarios whose initial state was safe
    pub safe_initial: usize,
    /// Scenarios whose initial state was unsafe
    pub unsafe_initial: usize,
    /// Requests granted
    pub granted: usize,
    /// Requests denied at the feasibility pre-check
    pub denied_infeasible: usize,
    /// Requests denied because the tentative state was unsafe
    pub denied_unsafe: usize,
    /// Stopped by `scenario_limit` before the space was exhausted
    pub truncated: bool,
}

impl ExplorationSummary {
    fn record(&mut self, report: &ScenarioReport) {
        self.scenarios += 1;
        if report.initial_safe {
            self.safe_initial += 1;
        } else {
            self.unsafe_initial += 1;
        }
        for step in &report.steps {
            match step.decision.denial() {
                None => self.granted += 1,
                Some(DenialReason::Infeasible { .. }) => self.denied_infeasible += 1,
                Some(DenialReason::Unsafe) => self.denied_unsafe += 1,
            }
        }
    }

    /// Total requests arbitrated
    pub fn requests(&self) -> usize {
        self.granted + self.denied_infeasible + self.denied_unsafe
    }
}

impl fmt::Display for ExplorationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Scenarios: {}{}",
            self.scenarios,
            if self.truncated { " (limit reached)" } else { "" }
        )?;
        writeln!(
            f,
            "Initial states: {} safe, {} unsafe",
            self.safe_initial, self.unsafe_initial
        )?;
        write!(
            f,
            "Requests: {} granted, {} denied infeasible, {} denied unsafe",
            self.granted, self.denied_infeasible, self.denied_unsafe
        )
    }
}

/// Exhaustive driver over every scenario a configuration admits
#[derive(Debug, Clone)]
pub struct Explorer {
    runner: ScenarioRunner,
}

impl Explorer {
    /// Create an explorer for a validated configuration
    pub fn new(config: ScenarioConfig) -> Result<Self, BankerError> {
        Ok(Self {
            runner: ScenarioRunner::new(config)?,
        })
    }

    /// The configuration
    pub fn config(&self) -> &ScenarioConfig {
        self.runner.config()
    }

    /// Run every scenario, handing each report to `visit`
    ///
    /// # Errors
    ///
    /// The first error from any scenario, unchanged.
    pub fn explore<F>(&self, mut visit: F) -> Result<ExplorationSummary, BankerError>
    where
        F: FnMut(&ScenarioReport),
    {
        let limit = self.config().scenario_limit;
        let mut source = ExhaustiveSource::new();
        let mut arbiter = RequestArbiter::new();
        let mut summary = ExplorationSummary::default();

        loop {
            if limit.is_some_and(|max| summary.scenarios >= max) {
                summary.truncated = true;
                break;
            }

            let report = match self.runner.run_with(&mut source, &mut arbiter) {
                Ok(report) => report,
                Err(err) => {
                    tracing::error!(
                        scenario = summary.scenarios + 1,
                        kind = ?err.kind(),
                        %err,
                        "exploration halted"
                    );
                    return Err(err);
                }
            };

            summary.record(&report);
            visit(&report);

            if !source.advance() {
                break;
            }
        }

        tracing::info!(
            scenarios = summary.scenarios,
            safe_initial = summary.safe_initial,
            unsafe_initial = summary.unsafe_initial,
            granted = summary.granted,
            denied_infeasible = summary.denied_infeasible,
            denied_unsafe = summary.denied_unsafe,
            truncated = summary.truncated,
            "exploration complete"
        );
        Ok(summary)
    }
}
