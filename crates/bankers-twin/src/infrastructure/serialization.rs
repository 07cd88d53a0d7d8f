//! Output encoding

use super::error::InfraError;
use crate::domain::scenario::ScenarioReport;
use serde::Serialize;

/// Pretty-printed JSON for any serializable value
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, InfraError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One report as a single JSON line
pub fn encode_report(report: &ScenarioReport) -> Result<String, InfraError> {
    Ok(serde_json::to_string(report)?)
}
