//! Ranking algorithms and the registry that looks them up by name.
//!
//! Every algorithm implements [`RankingAlgorithm`]: it takes a validated
//! [`DecisionProblem`] and returns a new [`DecisionResult`] without touching
//! its input.
//!
//! # Components
//!
//! - `WeightedSum` / `WeightedProduct` - classical additive and multiplicative models
//! - `Topsis` / `IntervalTopsis` - distance to ideal and negative-ideal solutions
//! - `Vikor` / `IntervalVikor` - compromise ranking from group utility and regret
//! - `ElectreI` - outranking from concordance and discordance
//! - `Todim` / `IntervalTodim` - prospect-theory pairwise dominance

mod common;
mod electre;
mod interval_todim;
mod interval_topsis;
mod interval_vikor;
mod registry;
mod todim;
mod topsis;
mod vikor;
mod wpm;
mod wsm;

pub use electre::ElectreI;
pub use interval_todim::IntervalTodim;
pub use interval_topsis::IntervalTopsis;
pub use interval_vikor::IntervalVikor;
pub use registry::{AlgorithmParameters, AlgorithmRegistry};
pub use todim::Todim;
pub use topsis::Topsis;
pub use vikor::Vikor;
pub use wpm::WeightedProduct;
pub use wsm::WeightedSum;

use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult};

/// A pluggable ranking method.
///
/// Implementations must be pure: the same problem always yields the same
/// result, and rankings cover every alternative exactly once.
pub trait RankingAlgorithm: Send + Sync {
    /// Registry key and `metadata.algorithm_name` of produced results.
    fn name(&self) -> &str;

    /// Whether interval cells are used as intervals rather than midpoints.
    fn supports_intervals(&self) -> bool {
        false
    }

    /// Stable description of the instance's default parameters.
    ///
    /// Two instances with equal names and configurations produce equal
    /// results for equal problems.
    fn configuration(&self) -> String {
        String::new()
    }

    /// Ranks the alternatives of `problem`.
    ///
    /// # Errors
    /// - `ValidationError` for fewer than two alternatives
    /// - `AlgorithmError` for violated numeric preconditions or bad parameters
    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError>;
}
