use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{EmissionFactors, ScenarioSettings, KEEP_PETROL_CAR};
use crate::error::{LcaError, Result};
use crate::fleet::FleetBaseline;

/// Everything one analysis run needs. Missing keys fall back to the reference values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub factors: EmissionFactors,
    pub scenarios: ScenarioSettings,
    pub fleet: FleetBaseline,
    /// Scenario the others are compared against.
    pub reference_scenario: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            factors: EmissionFactors::default(),
            scenarios: ScenarioSettings::default(),
            fleet: FleetBaseline::default(),
            reference_scenario: KEEP_PETROL_CAR.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| LcaError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| LcaError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.scenarios.validate(self.factors.vehicle_life_km)?;
        self.fleet.validate()?;
        if self.reference_scenario.is_empty() {
            return Err(LcaError::Config("reference_scenario must not be empty".into()));
        }
        Ok(())
    }
}
