//! Engine configuration module
//!
//! This module provides type-safe configuration loading using the `config` and
//! `dotenvy` crates. Environment variables use the `MCDA_ENGINE` prefix and
//! nested values are separated by double underscores. Every setting has a
//! default, so an empty environment yields a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use mcda_engine::config::EngineConfig;
//!
//! let config = EngineConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Default algorithm: {}", config.algorithms.default_algorithm);
//! ```

mod algorithms;
mod analysis;
mod error;
mod logging;

pub use algorithms::{AlgorithmDefaults, NormalizationKind};
pub use analysis::{ConstraintConfig, SensitivityConfig};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use std::path::Path;

use serde::Deserialize;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "MCDA_ENGINE";

/// Root engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Default algorithm and algorithm parameters
    #[serde(default)]
    pub algorithms: AlgorithmDefaults,

    /// Weight-sensitivity analysis
    #[serde(default)]
    pub sensitivity: SensitivityConfig,

    /// Veto handling
    #[serde(default)]
    pub constraints: ConstraintConfig,

    /// Tracing subscriber
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MCDA_ENGINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MCDA_ENGINE__ALGORITHMS__VIKOR_V=0.7` -> `algorithms.vikor_v = 0.7`
    /// - `MCDA_ENGINE__CONSTRAINTS__VETO_POLICY=penalize` -> `constraints.veto_policy = penalize`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a file, with environment variables layered on top
    ///
    /// The format is inferred from the extension (`.yaml`, `.json`, `.toml`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix(ENV_PREFIX)
            .separator("__")
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.algorithms.validate()?;
        self.sensitivity.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
