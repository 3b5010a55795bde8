//! VIKOR - compromise ranking from group utility and individual regret.

use super::common::{best_of, column, ensure_rankable, param_in_range, worst_of};
use super::RankingAlgorithm;
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// Default weight of the group-utility strategy.
pub const DEFAULT_V: f64 = 0.5;

/// Weighted gap `w · (gap / range)`, zero for a degenerate column.
pub(crate) fn weighted_gap(weight: f64, gap: f64, range: f64) -> f64 {
    if range == 0.0 {
        0.0
    } else {
        weight * (gap / range)
    }
}

/// `Q = v (S - S*)/(S- - S*) + (1 - v)(R - R*)/(R- - R*)`; degenerate terms are zero.
pub(crate) fn compromise_index(
    s: f64,
    r: f64,
    (s_best, s_worst): (f64, f64),
    (r_best, r_worst): (f64, f64),
    v: f64,
) -> f64 {
    let utility = if s_worst == s_best {
        0.0
    } else {
        (s - s_best) / (s_worst - s_best)
    };
    let regret = if r_worst == r_best {
        0.0
    } else {
        (r - r_best) / (r_worst - r_best)
    };
    v * utility + (1.0 - v) * regret
}

pub(crate) fn check_v(problem: &DecisionProblem, algorithm: &str, default: f64) -> Result<f64, EngineError> {
    Ok(param_in_range(
        problem,
        algorithm,
        "v",
        default,
        |v| (0.0..=1.0).contains(&v),
        "must be in [0, 1]",
    )?)
}

/// Crisp VIKOR.
///
/// # Algorithm
///
/// 1. Per criterion: best `f*` and worst `f-` by direction
/// 2. `S = Σ w·|f* - x|/|f* - f-|`, `R = max` of the same terms
/// 3. `Q` mixes normalized `S` and `R` with strategy weight `v`
/// 4. Rank ascending by `Q` (lower is better)
///
/// The acceptance conditions are reported as metrics:
/// `acceptable_advantage` (`Q(2nd) - Q(1st) ≥ 1/(m-1)`) and
/// `acceptable_stability` (the leader is also best by `S` or `R`), plus the
/// resulting `compromise_set`.
#[derive(Debug, Clone, Copy)]
pub struct Vikor {
    v: f64,
}

impl Default for Vikor {
    fn default() -> Self {
        Self { v: DEFAULT_V }
    }
}

impl Vikor {
    pub const NAME: &'static str = "vikor";

    /// Creates VIKOR with a default strategy weight; the problem's `v` parameter overrides it.
    pub fn new(v: f64) -> Self {
        Self { v }
    }
}

/// Acceptance analysis over a best-first ordering of `Q`.
pub(crate) struct Compromise {
    pub acceptable_advantage: bool,
    pub acceptable_stability: bool,
    pub set: Vec<String>,
}

pub(crate) fn analyze_compromise(
    alternatives: &[String],
    order: &[usize],
    q: &[f64],
    s: &[f64],
    r: &[f64],
) -> Compromise {
    let m = alternatives.len();
    let threshold = 1.0 / (m as f64 - 1.0);
    let leader = order[0];
    let runner_up = order[1];

    let acceptable_advantage = q[runner_up] - q[leader] >= threshold;
    let s_best = s.iter().copied().fold(f64::INFINITY, f64::min);
    let r_best = r.iter().copied().fold(f64::INFINITY, f64::min);
    let acceptable_stability = s[leader] == s_best || r[leader] == r_best;

    let set: Vec<String> = if !acceptable_advantage {
        order
            .iter()
            .take_while(|&&idx| q[idx] - q[leader] < threshold)
            .map(|&idx| alternatives[idx].clone())
            .collect()
    } else if !acceptable_stability {
        vec![alternatives[leader].clone(), alternatives[runner_up].clone()]
    } else {
        vec![alternatives[leader].clone()]
    };

    Compromise {
        acceptable_advantage,
        acceptable_stability,
        set,
    }
}

impl RankingAlgorithm for Vikor {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configuration(&self) -> String {
        format!("v={}", self.v)
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;
        let v = check_v(problem, Self::NAME, self.v)?;

        let matrix = problem.crisp_matrix();
        let weights = problem.normalized_weights();
        let extremes: Vec<(f64, f64)> = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                let col = column(&matrix, j);
                (best_of(&col, criterion.direction()), worst_of(&col, criterion.direction()))
            })
            .collect();

        let mut s = Vec::with_capacity(matrix.len());
        let mut r = Vec::with_capacity(matrix.len());
        for row in &matrix {
            let terms: Vec<f64> = row
                .iter()
                .zip(&extremes)
                .zip(&weights)
                .map(|((&x, &(best, worst)), &w)| weighted_gap(w, (best - x).abs(), (best - worst).abs()))
                .collect();
            s.push(terms.iter().sum::<f64>());
            r.push(terms.iter().copied().fold(0.0, f64::max));
        }

        let s_bounds = min_max(&s);
        let r_bounds = min_max(&r);
        let q: Vec<f64> = s
            .iter()
            .zip(&r)
            .map(|(&si, &ri)| compromise_index(si, ri, s_bounds, r_bounds, v))
            .collect();

        let mut order: Vec<usize> = (0..q.len()).collect();
        order.sort_by(|&a, &b| ScoreOrder::Ascending.compare(q[a], q[b]));

        let alternatives = problem.alternatives();
        let compromise = analyze_compromise(alternatives, &order, &q, &s, &r);
        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Ascending)
            .with_metric("S", MetricValue::by_alternative(alternatives, &s))
            .with_metric("R", MetricValue::by_alternative(alternatives, &r))
            .with_metric("Q", MetricValue::by_alternative(alternatives, &q))
            .with_metric("v", MetricValue::Number(v))
            .with_metric("acceptable_advantage", MetricValue::Flag(compromise.acceptable_advantage))
            .with_metric("acceptable_stability", MetricValue::Flag(compromise.acceptable_stability))
            .with_metric("compromise_set", MetricValue::Labels(compromise.set));
        Ok(DecisionResult::from_order(alternatives, &q, &order, metadata))
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    (
        values.iter().copied().fold(f64::INFINITY, f64::min),
        values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    )
}

#[cfg(test)]
mod tests {
    use super::super::common::fixtures;
    use super::*;
    use crate::domain::foundation::AlgorithmError;

    #[test]
    fn ranks_ascending_by_q() {
        let result = Vikor::default().compute(&fixtures::supplier_choice()).unwrap();
        assert_eq!(result.metadata.score_order, ScoreOrder::Ascending);
        assert_eq!(result.top().unwrap().alternative, "north");
        assert_eq!(result.top().unwrap().score, 0.0);
        let scores: Vec<f64> = result.rankings.iter().map(|r| r.score).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn reports_s_r_q_metrics() {
        let result = Vikor::default().compute(&fixtures::supplier_choice()).unwrap();
        for key in ["S", "R", "Q"] {
            assert!(result.metadata.metric(key).unwrap().for_alternative("west").is_some());
        }
        assert!(matches!(
            result.metadata.metric("acceptable_advantage"),
            Some(MetricValue::Flag(_))
        ));
    }

    #[test]
    fn identical_alternatives_share_zero_q() {
        let result = Vikor::default().compute(&fixtures::identical_pair()).unwrap();
        assert_eq!(result.score_of("first"), Some(0.0));
        assert_eq!(result.score_of("second"), Some(0.0));
        assert_eq!(result.ordered_alternatives(), vec!["first", "second"]);
        assert_eq!(
            result.metadata.metric("compromise_set"),
            Some(&MetricValue::Labels(vec!["first".to_string(), "second".to_string()]))
        );
    }

    #[test]
    fn rejects_out_of_range_v() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(crate::domain::model::Criterion::benefit("q", 1.0).unwrap())
            .row("A", &[1.0])
            .row("B", &[2.0])
            .param("v", 1.5)
            .build()
            .unwrap();
        let err = Vikor::default().compute(&problem).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Algorithm(AlgorithmError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn v_extremes_follow_single_strategy() {
        let problem = fixtures::three_by_three();
        let utility_only = Vikor::new(1.0).compute(&problem).unwrap();
        let s = utility_only.metadata.metric("S").unwrap();
        let best_s = problem
            .alternatives()
            .iter()
            .min_by(|a, b| {
                s.for_alternative(a)
                    .partial_cmp(&s.for_alternative(b))
                    .unwrap()
            })
            .unwrap();
        assert_eq!(utility_only.top().unwrap().alternative, *best_s);
    }

    #[test]
    fn compromise_index_handles_degenerate_ranges() {
        assert_eq!(compromise_index(0.3, 0.2, (0.3, 0.3), (0.2, 0.2), 0.5), 0.0);
        assert_eq!(compromise_index(1.0, 0.0, (0.0, 1.0), (0.0, 1.0), 0.5), 0.5);
    }
}
