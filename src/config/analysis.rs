//! Sensitivity and constraint configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::constraints::VetoPolicy;

/// Weight-sensitivity analysis settings
#[derive(Debug, Clone, Deserialize)]
pub struct SensitivityConfig {
    /// Run sensitivity analysis on every evaluation
    #[serde(default)]
    pub enabled: bool,

    /// Weight shift applied up and down per criterion
    #[serde(default = "default_delta")]
    pub delta: f64,

    /// Analyze criteria on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_delta() -> f64 {
    0.1
}

fn default_parallel() -> bool {
    true
}

impl SensitivityConfig {
    /// Validate sensitivity settings
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.delta > 0.0 && self.delta <= 1.0) {
            return Err(ValidationError::InvalidSensitivityDelta(self.delta));
        }
        Ok(())
    }
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            delta: default_delta(),
            parallel: default_parallel(),
        }
    }
}

/// Veto handling settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConstraintConfig {
    /// What happens to rejected alternatives
    #[serde(default)]
    pub veto_policy: VetoPolicy,
}
