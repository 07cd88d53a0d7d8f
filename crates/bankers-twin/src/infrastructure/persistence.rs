//! JSON documents on disk

use super::error::InfraError;
use crate::domain::resources::{ResourceState, StateSpec};
use crate::domain::scenario::ScenarioConfig;
use std::fs;
use std::path::Path;

/// Load and validate a scenario configuration
pub fn load_scenario_config(path: impl AsRef<Path>) -> Result<ScenarioConfig, InfraError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let config: ScenarioConfig = serde_json::from_str(&text)?;
    config.validate()?;
    tracing::debug!(path = %path.display(), ?config, "loaded scenario config");
    Ok(config)
}

/// Load a literal state and validate it into a [`ResourceState`]
pub fn load_state(path: impl AsRef<Path>) -> Result<ResourceState, InfraError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let spec: StateSpec = serde_json::from_str(&text)?;
    let state = ResourceState::try_from(spec)?;
    tracing::debug!(
        path = %path.display(),
        processes = state.num_processes(),
        resources = state.num_resources(),
        "loaded state"
    );
    Ok(state)
}

/// Write `state` as a [`StateSpec`] document
pub fn save_state(path: impl AsRef<Path>, state: &ResourceState) -> Result<(), InfraError> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(&StateSpec::from(state))?;
    fs::write(path, text).map_err(|e| InfraError::io(path, e))
}
