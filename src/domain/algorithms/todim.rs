//! TODIM - multicriteria ranking from prospect-theory dominance.

use super::common::{column, ensure_rankable, param_in_range, rescale_unit};
use super::RankingAlgorithm;
use crate::domain::analysis::NormalizationService;
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// Default loss attenuation factor.
pub const DEFAULT_THETA: f64 = 1.0;

/// Partial dominance `φ_c(Δ)` of one criterion.
///
/// Gains are concave (`sqrt(w Δ / Σw)`), losses are amplified by `1/θ`
/// (`-(1/θ) sqrt(Σw |Δ| / w)`). Zero-weight criteria contribute nothing.
pub(crate) fn partial_dominance(delta: f64, weight: f64, total_weight: f64, theta: f64) -> f64 {
    if weight == 0.0 || delta == 0.0 {
        0.0
    } else if delta > 0.0 {
        (weight * delta / total_weight).sqrt()
    } else {
        -(1.0 / theta) * (total_weight * -delta / weight).sqrt()
    }
}

pub(crate) fn check_theta(problem: &DecisionProblem, algorithm: &str, default: f64) -> Result<f64, EngineError> {
    Ok(param_in_range(
        problem,
        algorithm,
        "theta",
        default,
        |theta| theta > 0.0,
        "must be positive",
    )?)
}

/// Crisp TODIM.
///
/// # Algorithm
///
/// 1. MinMax-normalize each column by direction
/// 2. `δ(i, j) = Σ_c φ_c(n_ic - n_jc)` for every pair
/// 3. Total dominance `ξ_i = Σ_j δ(i, j)`
/// 4. Score = `ξ` min-max rescaled to `[0, 1]`, ranked descending
///
/// # Edge Cases
///
/// Equal total dominance for every alternative scores all of them 1.0.
#[derive(Debug, Clone, Copy)]
pub struct Todim {
    theta: f64,
}

impl Default for Todim {
    fn default() -> Self {
        Self { theta: DEFAULT_THETA }
    }
}

impl Todim {
    pub const NAME: &'static str = "todim";

    pub fn new(theta: f64) -> Self {
        Self { theta }
    }
}

impl RankingAlgorithm for Todim {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("theta={}", self.theta)
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;
        let theta = check_theta(problem, Self::NAME, self.theta)?;

        let matrix = problem.crisp_matrix();
        let columns: Vec<Vec<f64>> = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, criterion)| NormalizationService::min_max(&column(&matrix, j), criterion.direction()))
            .collect();
        let weights = problem.normalized_weights();
        let total_weight: f64 = weights.iter().sum();

        let n = matrix.len();
        let dominance: Vec<f64> = (0..n)
            .map(|i| {
                (0..n)
                    .filter(|&k| k != i)
                    .map(|k| {
                        columns
                            .iter()
                            .zip(&weights)
                            .map(|(col, &w)| partial_dominance(col[i] - col[k], w, total_weight, theta))
                            .sum::<f64>()
                    })
                    .sum()
            })
            .collect();

        let scores = rescale_unit(&dominance);
        let alternatives = problem.alternatives();
        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending)
            .with_metric("dominance", MetricValue::by_alternative(alternatives, &dominance))
            .with_metric("theta", MetricValue::Number(theta));
        Ok(DecisionResult::from_scores(alternatives, &scores, metadata))
    }
}
