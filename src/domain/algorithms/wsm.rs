//! Weighted Sum Model.

use tracing::debug;

use super::common::ensure_rankable;
use super::RankingAlgorithm;
use crate::domain::analysis::{NormalizationMethod, NormalizationService};
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// Additive weighting over normalized columns.
///
/// # Algorithm
///
/// 1. Normalize each column with the configured method (MinMax by default)
/// 2. `score = Σ weight_c · normalized / Σ weight_c`
/// 3. Rank descending
///
/// A `steepness` parameter on the problem overrides the sigmoid steepness
/// when the sigmoid method is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedSum {
    method: NormalizationMethod,
}

impl WeightedSum {
    pub const NAME: &'static str = "wsm";

    /// Creates a WSM using the given normalization.
    pub fn new(method: NormalizationMethod) -> Self {
        Self { method }
    }

    fn method_for(&self, problem: &DecisionProblem) -> NormalizationMethod {
        match (self.method, problem.algorithm().param("steepness")) {
            (NormalizationMethod::Sigmoid(mut params), Some(k)) => {
                params.steepness = k;
                NormalizationMethod::Sigmoid(params)
            }
            (method, _) => method,
        }
    }
}

impl RankingAlgorithm for WeightedSum {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("{:?}", self.method)
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;

        let weights = problem.normalized_weights();
        let normalized = NormalizationService::normalize_problem(problem, self.method_for(problem));
        let scores: Vec<f64> = normalized
            .rows
            .iter()
            .map(|row| row.iter().zip(&weights).map(|(value, w)| value * w).sum())
            .collect();

        debug!(
            algorithm = Self::NAME,
            alternatives = problem.alternative_count(),
            "Computed weighted sums"
        );

        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending).with_metric(
            "weighted_scores",
            MetricValue::by_alternative(problem.alternatives(), &scores),
        );
        Ok(DecisionResult::from_scores(problem.alternatives(), &scores, metadata))
    }
}
