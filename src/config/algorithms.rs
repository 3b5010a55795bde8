//! Algorithm defaults configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::algorithms::{AlgorithmParameters, AlgorithmRegistry};
use crate::domain::analysis::{NormalizationMethod, SigmoidParams};

/// Default algorithm selection and parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmDefaults {
    /// Algorithm used when neither the caller nor the problem names one
    #[serde(default = "default_algorithm")]
    pub default_algorithm: String,

    /// VIKOR strategy weight `v`
    #[serde(default = "default_vikor_v")]
    pub vikor_v: f64,

    /// ELECTRE I concordance threshold
    #[serde(default = "default_electre_alpha")]
    pub electre_alpha: f64,

    /// ELECTRE I discordance threshold
    #[serde(default = "default_electre_beta")]
    pub electre_beta: f64,

    /// TODIM loss attenuation factor
    #[serde(default = "default_todim_theta")]
    pub todim_theta: f64,

    /// Column normalization used by WSM
    #[serde(default)]
    pub wsm_normalization: NormalizationKind,

    /// Steepness used when `wsm_normalization` is `sigmoid`
    #[serde(default = "default_sigmoid_steepness")]
    pub sigmoid_steepness: f64,
}

/// Normalization names accepted in configuration
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationKind {
    #[default]
    #[serde(alias = "minmax")]
    MinMax,
    Vector,
    Sigmoid,
}

fn default_algorithm() -> String {
    "topsis".to_string()
}

fn default_vikor_v() -> f64 {
    0.5
}

fn default_electre_alpha() -> f64 {
    0.65
}

fn default_electre_beta() -> f64 {
    0.35
}

fn default_todim_theta() -> f64 {
    1.0
}

fn default_sigmoid_steepness() -> f64 {
    1.0
}

impl AlgorithmDefaults {
    /// Normalization method handed to WSM
    pub fn normalization(&self) -> NormalizationMethod {
        match self.wsm_normalization {
            NormalizationKind::MinMax => NormalizationMethod::MinMax,
            NormalizationKind::Vector => NormalizationMethod::Vector,
            NormalizationKind::Sigmoid => NormalizationMethod::Sigmoid(SigmoidParams {
                steepness: self.sigmoid_steepness,
                ..SigmoidParams::default()
            }),
        }
    }

    /// Parameters for building the algorithm registry
    pub fn to_parameters(&self) -> AlgorithmParameters {
        AlgorithmParameters {
            wsm_normalization: self.normalization(),
            vikor_v: self.vikor_v,
            electre_alpha: self.electre_alpha,
            electre_beta: self.electre_beta,
            todim_theta: self.todim_theta,
        }
    }

    /// Validate algorithm defaults
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_algorithm.is_empty() {
            return Err(ValidationError::MissingRequired("algorithms.default_algorithm"));
        }
        if !AlgorithmRegistry::with_defaults().has_algorithm(&self.default_algorithm) {
            return Err(ValidationError::UnknownAlgorithm(self.default_algorithm.clone()));
        }
        if !(0.0..=1.0).contains(&self.vikor_v) {
            return Err(ValidationError::InvalidVikorWeight(self.vikor_v));
        }
        for (name, value) in [("alpha", self.electre_alpha), ("beta", self.electre_beta)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidElectreThreshold { name, value });
            }
        }
        if !(self.todim_theta.is_finite() && self.todim_theta > 0.0) {
            return Err(ValidationError::InvalidTodimTheta(self.todim_theta));
        }
        if !(self.sigmoid_steepness.is_finite() && self.sigmoid_steepness > 0.0) {
            return Err(ValidationError::InvalidSigmoidSteepness(self.sigmoid_steepness));
        }
        Ok(())
    }
}

impl Default for AlgorithmDefaults {
    fn default() -> Self {
        Self {
            default_algorithm: default_algorithm(),
            vikor_v: default_vikor_v(),
            electre_alpha: default_electre_alpha(),
            electre_beta: default_electre_beta(),
            todim_theta: default_todim_theta(),
            wsm_normalization: NormalizationKind::default(),
            sigmoid_steepness: default_sigmoid_steepness(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let defaults = AlgorithmDefaults::default();
        assert!(defaults.validate().is_ok());
        assert_eq!(defaults.default_algorithm, "topsis");
        assert_eq!(defaults.to_parameters(), AlgorithmParameters::default());
    }

    #[test]
    fn test_rejects_unknown_default_algorithm() {
        let defaults = AlgorithmDefaults {
            default_algorithm: "ahp".to_string(),
            ..AlgorithmDefaults::default()
        };
        assert_eq!(
            defaults.validate(),
            Err(ValidationError::UnknownAlgorithm("ahp".to_string()))
        );
    }

    #[test]
    fn test_rejects_out_of_range_parameters() {
        let vikor = AlgorithmDefaults {
            vikor_v: 1.2,
            ..AlgorithmDefaults::default()
        };
        assert_eq!(vikor.validate(), Err(ValidationError::InvalidVikorWeight(1.2)));

        let electre = AlgorithmDefaults {
            electre_beta: -0.1,
            ..AlgorithmDefaults::default()
        };
        assert!(matches!(
            electre.validate(),
            Err(ValidationError::InvalidElectreThreshold { name: "beta", .. })
        ));

        let todim = AlgorithmDefaults {
            todim_theta: 0.0,
            ..AlgorithmDefaults::default()
        };
        assert_eq!(todim.validate(), Err(ValidationError::InvalidTodimTheta(0.0)));
    }

    #[test]
    fn test_sigmoid_normalization_carries_steepness() {
        let json = r#"{"wsm_normalization": "sigmoid", "sigmoid_steepness": 2.5}"#;
        let defaults: AlgorithmDefaults = serde_json::from_str(json).unwrap();
        match defaults.normalization() {
            NormalizationMethod::Sigmoid(params) => assert_eq!(params.steepness, 2.5),
            other => panic!("Expected sigmoid, got {:?}", other),
        }
    }

    #[test]
    fn test_minmax_alias() {
        let defaults: AlgorithmDefaults =
            serde_json::from_str(r#"{"wsm_normalization": "minmax"}"#).unwrap();
        assert_eq!(defaults.wsm_normalization, NormalizationKind::MinMax);
    }
}
