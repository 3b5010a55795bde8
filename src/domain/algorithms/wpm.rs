//! Weighted Product Model.

use super::common::{column, ensure_rankable};
use super::RankingAlgorithm;
use crate::domain::foundation::{AlgorithmError, EngineError};
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// Multiplicative weighting over ratio-scaled values.
///
/// # Algorithm
///
/// 1. Scale each column by its maximum: `r = x / max(column)`
/// 2. `score = Π r^(±w)` with `+w` for benefit and `-w` for cost criteria
/// 3. Rank descending
///
/// # Errors
///
/// Every raw value must be strictly positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedProduct;

impl WeightedProduct {
    pub const NAME: &'static str = "wpm";
}

impl RankingAlgorithm for WeightedProduct {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;

        let matrix = problem.crisp_matrix();
        for (alt, row) in problem.alternatives().iter().zip(&matrix) {
            for (criterion, &value) in problem.criteria().iter().zip(row) {
                if value <= 0.0 {
                    return Err(AlgorithmError::NonPositiveValue {
                        algorithm: Self::NAME.to_string(),
                        alternative: alt.clone(),
                        criterion: criterion.name().to_string(),
                        value,
                    }
                    .into());
                }
            }
        }

        let weights = problem.normalized_weights();
        let maxima: Vec<f64> = (0..problem.criterion_count())
            .map(|j| column(&matrix, j).into_iter().fold(f64::NEG_INFINITY, f64::max))
            .collect();

        let scores: Vec<f64> = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .zip(problem.criteria())
                    .zip(weights.iter().zip(&maxima))
                    .map(|((&value, criterion), (&w, &max))| {
                        (value / max).powf(criterion.direction().sign() * w)
                    })
                    .product()
            })
            .collect();

        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending).with_metric(
            "product_scores",
            MetricValue::by_alternative(problem.alternatives(), &scores),
        );
        Ok(DecisionResult::from_scores(problem.alternatives(), &scores, metadata))
    }
}
