//! Interval VIKOR.

use super::common::{column, ensure_rankable};
use super::vikor::{analyze_compromise, check_v, compromise_index, weighted_gap, DEFAULT_V};
use super::RankingAlgorithm;
use crate::domain::analysis::possibility;
use crate::domain::foundation::{Direction, EngineError, Interval};
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// VIKOR over interval-valued scores.
///
/// # Algorithm
///
/// 1. Benefit criteria: `f* = max u`, `f- = min l`; cost criteria: `f* = min l`, `f- = max u`
/// 2. Interval gaps `d = w · [gap(near bound), gap(far bound)] / |f* - f-|`
/// 3. `S = Σ d`, `R = [max d.l, max d.u]`
/// 4. `Q` bounds from `S* = min S.l`, `S- = max S.u` (likewise for `R`)
/// 5. Rank by pairwise possibility preference, lowest `Q` first; score is the
///    `Q` midpoint, which that preference always agrees with
///
/// Zero-width intervals reproduce crisp VIKOR.
#[derive(Debug, Clone, Copy)]
pub struct IntervalVikor {
    v: f64,
}

impl Default for IntervalVikor {
    fn default() -> Self {
        Self { v: DEFAULT_V }
    }
}

impl IntervalVikor {
    pub const NAME: &'static str = "interval_vikor";

    pub fn new(v: f64) -> Self {
        Self { v }
    }
}

fn gap_interval(cell: &Interval, best: f64, range: f64, weight: f64, direction: Direction) -> Interval {
    match direction {
        Direction::HigherBetter => Interval::spanning(
            weighted_gap(weight, best - cell.upper(), range),
            weighted_gap(weight, best - cell.lower(), range),
        ),
        Direction::LowerBetter => Interval::spanning(
            weighted_gap(weight, cell.lower() - best, range),
            weighted_gap(weight, cell.upper() - best, range),
        ),
    }
}

impl RankingAlgorithm for IntervalVikor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("v={}", self.v)
    }

    fn supports_intervals(&self) -> bool {
        true
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, true)?;
        let v = check_v(problem, Self::NAME, self.v)?;

        let matrix = problem.interval_matrix();
        let weights = problem.normalized_weights();
        let extremes: Vec<(f64, f64)> = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                let col = column(&matrix, j);
                let min_l = col.iter().map(Interval::lower).fold(f64::INFINITY, f64::min);
                let max_u = col.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max);
                match criterion.direction() {
                    Direction::HigherBetter => (max_u, min_l),
                    Direction::LowerBetter => (min_l, max_u),
                }
            })
            .collect();

        let mut s = Vec::with_capacity(matrix.len());
        let mut r = Vec::with_capacity(matrix.len());
        for row in &matrix {
            let gaps: Vec<Interval> = row
                .iter()
                .zip(problem.criteria())
                .zip(extremes.iter().zip(&weights))
                .map(|((cell, criterion), (&(best, worst), &w))| {
                    gap_interval(cell, best, (best - worst).abs(), w, criterion.direction())
                })
                .collect();
            let sum = Interval::spanning(
                gaps.iter().map(Interval::lower).sum(),
                gaps.iter().map(Interval::upper).sum(),
            );
            let max = Interval::spanning(
                gaps.iter().map(Interval::lower).fold(0.0, f64::max),
                gaps.iter().map(Interval::upper).fold(0.0, f64::max),
            );
            s.push(sum);
            r.push(max);
        }

        let s_bounds = (
            s.iter().map(Interval::lower).fold(f64::INFINITY, f64::min),
            s.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max),
        );
        let r_bounds = (
            r.iter().map(Interval::lower).fold(f64::INFINITY, f64::min),
            r.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max),
        );
        let q: Vec<Interval> = s
            .iter()
            .zip(&r)
            .map(|(si, ri)| {
                Interval::spanning(
                    compromise_index(si.lower(), ri.lower(), s_bounds, r_bounds, v),
                    compromise_index(si.upper(), ri.upper(), s_bounds, r_bounds, v),
                )
            })
            .collect();

        let order = possibility::preference_ascending(&q);
        let possibility_scores = possibility::aggregate_scores(&q);
        let q_mid: Vec<f64> = q.iter().map(Interval::midpoint).collect();
        let s_mid: Vec<f64> = s.iter().map(Interval::midpoint).collect();
        let r_mid: Vec<f64> = r.iter().map(Interval::midpoint).collect();

        let alternatives = problem.alternatives();
        let compromise = analyze_compromise(alternatives, &order, &q_mid, &s_mid, &r_mid);
        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Ascending)
            .with_metric("S", MetricValue::intervals_by_alternative(alternatives, &s))
            .with_metric("R", MetricValue::intervals_by_alternative(alternatives, &r))
            .with_metric("Q", MetricValue::intervals_by_alternative(alternatives, &q))
            .with_metric(
                "possibility_score",
                MetricValue::by_alternative(alternatives, &possibility_scores),
            )
            .with_metric("v", MetricValue::Number(v))
            .with_metric("acceptable_advantage", MetricValue::Flag(compromise.acceptable_advantage))
            .with_metric("acceptable_stability", MetricValue::Flag(compromise.acceptable_stability))
            .with_metric("compromise_set", MetricValue::Labels(compromise.set));
        Ok(DecisionResult::from_order(alternatives, &q_mid, &order, metadata))
    }
}
