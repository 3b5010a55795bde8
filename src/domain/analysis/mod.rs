//! Analysis Module - Pure domain services around the ranking algorithms.
//!
//! # Components
//!
//! - `ScoringApplier` - Converts raw measurements into scores via scoring rules
//! - `NormalizationService` - MinMax, vector and sigmoid column normalization
//! - `possibility` - Possibility-degree comparison and ranking of intervals
//! - `SensitivityAnalyzer` - Rank stability under weight perturbation
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take domain
//! objects as input and return computed results. No ports or adapters needed
//! since there's no I/O or external dependencies.

mod normalization;
pub mod possibility;
mod scoring_applier;
mod sensitivity;

pub use normalization::{
    NormalizationMethod, NormalizationService, NormalizedMatrix, SigmoidParams, SIGMA_EPSILON,
};
pub use possibility::{IntervalOrdering, PossibilityScore};
pub use scoring_applier::ScoringApplier;
pub use sensitivity::{
    CriterionSensitivity, PerturbationResult, SensitivityAnalyzer, SensitivityResult,
};
