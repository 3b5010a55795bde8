//! Interval TODIM.

use super::common::{column, ensure_rankable};
use super::todim::{check_theta, partial_dominance, DEFAULT_THETA};
use super::RankingAlgorithm;
use crate::domain::analysis::{possibility, NormalizationService};
use crate::domain::foundation::{EngineError, Interval};
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// TODIM over interval-valued scores.
///
/// # Algorithm
///
/// 1. Interval MinMax per column over the lowest lower and highest upper bound
/// 2. `Δ = N_i - N_k` by interval subtraction
/// 3. `φ` is monotone, so it is applied to both bounds of `Δ`
/// 4. Interval dominance `ξ_i = Σ_k Σ_c φ_c(Δ)`
/// 5. Rank by pairwise possibility preference, highest first; score is the
///    `ξ` midpoint rescaled over the lowest lower and highest upper bound of
///    all `ξ`, so scores never disagree with ranks
#[derive(Debug, Clone, Copy)]
pub struct IntervalTodim {
    theta: f64,
}

impl Default for IntervalTodim {
    fn default() -> Self {
        Self { theta: DEFAULT_THETA }
    }
}

impl IntervalTodim {
    pub const NAME: &'static str = "interval_todim";

    pub fn new(theta: f64) -> Self {
        Self { theta }
    }
}

impl RankingAlgorithm for IntervalTodim {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("theta={}", self.theta)
    }

    fn supports_intervals(&self) -> bool {
        true
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, true)?;
        let theta = check_theta(problem, Self::NAME, self.theta)?;

        let matrix = problem.interval_matrix();
        let columns: Vec<Vec<Interval>> = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                NormalizationService::min_max_intervals(&column(&matrix, j), criterion.direction())
            })
            .collect();
        let weights = problem.normalized_weights();
        let total_weight: f64 = weights.iter().sum();

        let n = matrix.len();
        let dominance: Vec<Interval> = (0..n)
            .map(|i| {
                let pairwise: Vec<Interval> = (0..n)
                    .filter(|&k| k != i)
                    .map(|k| {
                        let partials: Vec<Interval> = columns
                            .iter()
                            .zip(&weights)
                            .map(|(col, &w)| {
                                col[i]
                                    .subtract(&col[k])
                                    .map_monotone(|d| partial_dominance(d, w, total_weight, theta))
                            })
                            .collect();
                        sum_intervals(&partials)
                    })
                    .collect();
                sum_intervals(&pairwise)
            })
            .collect();

        let low = dominance.iter().map(Interval::lower).fold(f64::INFINITY, f64::min);
        let high = dominance.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max);
        let scores: Vec<f64> = dominance
            .iter()
            .map(|xi| {
                if high == low {
                    1.0
                } else {
                    (xi.midpoint() - low) / (high - low)
                }
            })
            .collect();

        let order = possibility::preference_descending(&dominance);
        let alternatives = problem.alternatives();
        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending)
            .with_metric("dominance", MetricValue::intervals_by_alternative(alternatives, &dominance))
            .with_metric("theta", MetricValue::Number(theta));
        Ok(DecisionResult::from_order(alternatives, &scores, &order, metadata))
    }
}

fn sum_intervals(values: &[Interval]) -> Interval {
    Interval::spanning(
        values.iter().map(Interval::lower).sum(),
        values.iter().map(Interval::upper).sum(),
    )
}
