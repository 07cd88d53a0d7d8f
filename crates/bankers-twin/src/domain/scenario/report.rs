//! Scenario reports
//!
//! Structured record of one scenario run. Serializes to JSON for tooling
//! and renders as plain diagnostic text through `Display`:
//!
//! ```text
//! Available:
//!    3   3
//! Max:
//!    3   2
//!    2   2
//! ...
//! Initial state: safe (p0 -> p1)
//! Step 1: p0 requests [1, 1] -> granted
//! ```

use crate::domain::arbiter::Decision;
use crate::domain::resources::{ProcessId, ResourceState, Units};
use crate::domain::safety::SafeSequence;
use serde::Serialize;
use std::fmt;

/// One dynamic request and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based step number
    pub step: usize,
    /// Requesting process
    pub process: ProcessId,
    /// Requested vector
    pub request: Vec<Units>,
    /// Arbitration result
    pub decision: Decision,
    /// Safety of the state after the step
    pub safe_after: bool,
}

/// Full record of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    /// State as generated
    pub initial: ResourceState,
    /// Verdict on the initial state
    pub initial_safe: bool,
    /// Completion order of the initial state, when the oracle ran and found one
    pub safe_sequence: Option<SafeSequence>,
    /// Dynamic requests, in order
    pub steps: Vec<StepReport>,
    /// State after the last step
    #[serde(rename = "final")]
    pub final_state: ResourceState,
}

impl ScenarioReport {
    /// Number of granted requests
    pub fn granted(&self) -> usize {
        self.steps.iter().filter(|s| s.decision.is_granted()).count()
    }

    /// Number of denied requests
    pub fn denied(&self) -> usize {
        self.steps.len() - self.granted()
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[Units]) -> fmt::Result {
    for value in row {
        write!(f, "{value:4}")?;
    }
    writeln!(f)
}

fn write_matrix(f: &mut fmt::Formatter<'_>, title: &str, rows: &[Vec<Units>]) -> fmt::Result {
    writeln!(f, "{title}:")?;
    for row in rows {
        write_row(f, row)?;
    }
    Ok(())
}

fn write_state(f: &mut fmt::Formatter<'_>, state: &ResourceState) -> fmt::Result {
    writeln!(f, "Available:")?;
    write_row(f, state.available())?;
    write_matrix(f, "Max", state.max_matrix())?;
    write_matrix(f, "Allocation", state.allocation_matrix())?;
    write_matrix(f, "Need", state.need_matrix())
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_state(f, &self.initial)?;

        let verdict = if self.initial_safe { "safe" } else { "unsafe" };
        match &self.safe_sequence {
            Some(seq) => writeln!(f, "Initial state: {verdict} ({seq})")?,
            None => writeln!(f, "Initial state: {verdict}")?,
        }

        for step in &self.steps {
            writeln!(
                f,
                "Step {}: {} requests {:?} -> {}",
                step.step, step.process, step.request, step.decision
            )?;
        }

        if !self.steps.is_empty() {
            writeln!(f, "Final available:")?;
            write_row(f, self.final_state.available())?;
            write_matrix(f, "Final allocation", self.final_state.allocation_matrix())?;
        }
        Ok(())
    }
}
