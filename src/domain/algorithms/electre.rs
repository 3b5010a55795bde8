//! ELECTRE I - outranking from concordance and discordance.

use tracing::debug;

use super::common::{column, ensure_rankable, param_in_range};
use super::RankingAlgorithm;
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

pub const DEFAULT_ALPHA: f64 = 0.65;
pub const DEFAULT_BETA: f64 = 0.35;

/// ELECTRE I outranking.
///
/// # Algorithm
///
/// For every ordered pair `(a, b)`:
/// - Concordance `c(a, b)`: share of weight on which `a` is at least as good as `b`
/// - Discordance `d(a, b)`: largest gap where `b` beats `a`, over that criterion's range
/// - `a` outranks `b` iff `c ≥ alpha` and `d ≤ beta`
///
/// Alternatives outranked by fewer rivals come first; ties break on the net
/// outranking count (outranks minus outranked-by), then input order. The
/// score `net / 2n - outranked_by` encodes that order: `|net| < n`, so the
/// net term never outweighs one extra loss. The kernel lists alternatives
/// nobody outranks.
///
/// # Parameters
///
/// `alpha` (concordance threshold) and `beta` (discordance threshold), both in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub struct ElectreI {
    alpha: f64,
    beta: f64,
}

impl Default for ElectreI {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

impl ElectreI {
    pub const NAME: &'static str = "electre_i";

    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Outranking relation `outranks[a][b]`.
    fn outranking(problem: &DecisionProblem, alpha: f64, beta: f64) -> Vec<Vec<bool>> {
        let matrix = problem.crisp_matrix();
        let weights = problem.normalized_weights();
        let signs: Vec<f64> = problem.criteria().iter().map(|c| c.direction().sign()).collect();
        let ranges: Vec<f64> = (0..problem.criterion_count())
            .map(|j| {
                let col = column(&matrix, j);
                let min = col.iter().copied().fold(f64::INFINITY, f64::min);
                let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                max - min
            })
            .collect();

        let n = matrix.len();
        let mut outranks = vec![vec![false; n]; n];
        for a in 0..n {
            for b in 0..n {
                if a == b {
                    continue;
                }
                let mut concordance = 0.0;
                let mut discordance: f64 = 0.0;
                for j in 0..signs.len() {
                    let advantage = signs[j] * (matrix[a][j] - matrix[b][j]);
                    if advantage >= 0.0 {
                        concordance += weights[j];
                    } else if ranges[j] > 0.0 {
                        discordance = discordance.max(-advantage / ranges[j]);
                    }
                }
                outranks[a][b] = concordance >= alpha && discordance <= beta;
            }
        }
        outranks
    }
}

impl RankingAlgorithm for ElectreI {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("alpha={},beta={}", self.alpha, self.beta)
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;
        let unit = |x: f64| (0.0..=1.0).contains(&x);
        let alpha = param_in_range(problem, Self::NAME, "alpha", self.alpha, unit, "must be in [0, 1]")?;
        let beta = param_in_range(problem, Self::NAME, "beta", self.beta, unit, "must be in [0, 1]")?;

        let outranks = Self::outranking(problem, alpha, beta);
        let n = outranks.len();
        let wins: Vec<f64> = (0..n)
            .map(|a| outranks[a].iter().filter(|&&o| o).count() as f64)
            .collect();
        let losses: Vec<f64> = (0..n)
            .map(|b| (0..n).filter(|&a| outranks[a][b]).count() as f64)
            .collect();
        let net: Vec<f64> = wins.iter().zip(&losses).map(|(w, l)| w - l).collect();
        let scale = 2.0 * n as f64;
        let scores: Vec<f64> = net.iter().zip(&losses).map(|(net, loss)| net / scale - loss).collect();

        let alternatives = problem.alternatives();
        let kernel: Vec<String> = (0..n)
            .filter(|&i| losses[i] == 0.0)
            .map(|i| alternatives[i].clone())
            .collect();

        debug!(
            algorithm = Self::NAME,
            alpha,
            beta,
            kernel_size = kernel.len(),
            "Built outranking relation"
        );

        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending)
            .with_metric("outranks", MetricValue::by_alternative(alternatives, &wins))
            .with_metric("outranked_by", MetricValue::by_alternative(alternatives, &losses))
            .with_metric("net_outranking", MetricValue::by_alternative(alternatives, &net))
            .with_metric("kernel", MetricValue::Labels(kernel))
            .with_metric("concordance_threshold", MetricValue::Number(alpha))
            .with_metric("discordance_threshold", MetricValue::Number(beta));
        Ok(DecisionResult::from_scores(alternatives, &scores, metadata))
    }
}
