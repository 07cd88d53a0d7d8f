//! Scenario configuration
//!
//! Loaded from JSON with every field optional:
//!
//! ```json
//! { "processes": 2, "resources": 2, "max_units": 3, "requests": 2 }
//! ```

use crate::domain::error::BankerError;
use crate::domain::resources::{Units, MAX_PROCESSES};
use crate::domain::safety::MAX_ORACLE_PROCESSES;
use serde::{Deserialize, Serialize};

/// Default values for configuration
mod defaults {
    use crate::domain::resources::Units;

    pub fn processes() -> usize { 2 }
    pub fn resources() -> usize { 2 }
    pub fn max_units() -> Units { 3 }
    pub fn requests() -> usize { 2 }
    pub fn cross_check() -> bool { true }
}

/// Bounds and shape of a generated scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Number of processes (P)
    #[serde(default = "defaults::processes")]
    pub processes: usize,

    /// Number of resource types (R)
    #[serde(default = "defaults::resources")]
    pub resources: usize,

    /// Upper bound for generated Available and Max components
    #[serde(default = "defaults::max_units")]
    pub max_units: Units,

    /// Dynamic requests issued after the initial state is built
    #[serde(default = "defaults::requests")]
    pub requests: usize,

    /// Cross-check every reachable state against the search oracle; needs
    /// `processes <= MAX_ORACLE_PROCESSES`
    #[serde(default = "defaults::cross_check")]
    pub cross_check: bool,

    /// Stop exhaustive exploration after this many scenarios
    #[serde(default)]
    pub scenario_limit: Option<usize>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            processes: defaults::processes(),
            resources: defaults::resources(),
            max_units: defaults::max_units(),
            requests: defaults::requests(),
            cross_check: defaults::cross_check(),
            scenario_limit: None,
        }
    }
}

impl ScenarioConfig {
    /// Default configuration (P = 2, R = 2, values in [0, 3], two requests)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the process count
    pub fn processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    /// Set the resource type count
    pub fn resources(mut self, resources: usize) -> Self {
        self.resources = resources;
        self
    }

    /// Set the upper bound for generated values
    pub fn max_units(mut self, max_units: Units) -> Self {
        self.max_units = max_units;
        self
    }

    /// Set the number of dynamic requests
    pub fn requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    /// Enable or disable oracle cross-checking
    pub fn cross_check(mut self, enabled: bool) -> Self {
        self.cross_check = enabled;
        self
    }

    /// Cap the number of explored scenarios
    pub fn scenario_limit(mut self, limit: Option<usize>) -> Self {
        self.scenario_limit = limit;
        self
    }

    /// Reject configurations no scenario can be built from
    pub fn validate(&self) -> Result<(), BankerError> {
        if self.processes == 0 || self.resources == 0 {
            return Err(BankerError::ZeroDimension {
                processes: self.processes,
                resources: self.resources,
            });
        }
        if self.processes > MAX_PROCESSES {
            return Err(BankerError::TooManyProcesses {
                processes: self.processes,
                max: MAX_PROCESSES,
            });
        }
        if self.cross_check && self.processes > MAX_ORACLE_PROCESSES {
            return Err(BankerError::OracleTooLarge {
                processes: self.processes,
                max: MAX_ORACLE_PROCESSES,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ScenarioConfig::default();
        assert_eq!(config.processes, 2);
        assert_eq!(config.resources, 2);
        assert_eq!(config.max_units, 3);
        assert_eq!(config.requests, 2);
        assert!(config.cross_check);
        assert_eq!(config.scenario_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScenarioConfig = serde_json::from_str(r#"{"processes": 3}"#).unwrap();
        assert_eq!(config, ScenarioConfig::new().processes(3));
    }

    #[test]
    fn test_builder() {
        let config = ScenarioConfig::new()
            .processes(4)
            .resources(1)
            .max_units(2)
            .requests(0)
            .cross_check(false)
            .scenario_limit(Some(10));
        assert_eq!(config.processes, 4);
        assert_eq!(config.resources, 1);
        assert_eq!(config.max_units, 2);
        assert_eq!(config.requests, 0);
        assert!(!config.cross_check);
        assert_eq!(config.scenario_limit, Some(10));
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        assert!(matches!(
            ScenarioConfig::new().processes(0).validate(),
            Err(BankerError::ZeroDimension { .. })
        ));
        assert!(matches!(
            ScenarioConfig::new().resources(0).validate(),
            Err(BankerError::ZeroDimension { .. })
        ));
        assert!(matches!(
            ScenarioConfig::new().processes(65).cross_check(false).validate(),
            Err(BankerError::TooManyProcesses { processes: 65, max: 64 })
        ));
    }

    #[test]
    fn test_validate_caps_cross_checked_processes() {
        let at_cap = ScenarioConfig::new().processes(MAX_ORACLE_PROCESSES);
        assert!(at_cap.validate().is_ok());

        let over = ScenarioConfig::new().processes(MAX_ORACLE_PROCESSES + 1);
        let err = over.validate().unwrap_err();
        assert_eq!(
            err,
            BankerError::OracleTooLarge {
                processes: MAX_ORACLE_PROCESSES + 1,
                max: MAX_ORACLE_PROCESSES,
            }
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);

        assert!(over.cross_check(false).validate().is_ok());
    }
}
