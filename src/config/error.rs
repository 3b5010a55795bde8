//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Unknown default algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("VIKOR strategy weight must be in [0, 1], got {0}")]
    InvalidVikorWeight(f64),

    #[error("ELECTRE {name} threshold must be in [0, 1], got {value}")]
    InvalidElectreThreshold { name: &'static str, value: f64 },

    #[error("TODIM theta must be positive, got {0}")]
    InvalidTodimTheta(f64),

    #[error("Sigmoid steepness must be positive, got {0}")]
    InvalidSigmoidSteepness(f64),

    #[error("Sensitivity delta must be in (0, 1], got {0}")]
    InvalidSensitivityDelta(f64),

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
