//! Interval TOPSIS.

use super::common::{column, ensure_rankable};
use super::topsis::closeness;
use super::RankingAlgorithm;
use crate::domain::foundation::{Direction, EngineError, Interval};
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// TOPSIS over interval-valued scores.
///
/// # Algorithm
///
/// 1. Column norm `sqrt(Σ (l² + u²) / 2)`; each bound is divided by it and weighted
/// 2. Benefit ideal `[max l, max u]`, negative-ideal `[min l, min u]`
///    (swapped for cost criteria)
/// 3. Interval distance `sqrt(Σ ((Δl)² + (Δu)²) / 2)`
/// 4. `score = D- / (D+ + D-)`, ranked descending
///
/// Zero-width intervals reproduce crisp TOPSIS exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalTopsis;

impl IntervalTopsis {
    pub const NAME: &'static str = "interval_topsis";
}

fn interval_distance(a: &[Interval], b: &[Interval]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let dl = x.lower() - y.lower();
            let du = x.upper() - y.upper();
            (dl * dl + du * du) / 2.0
        })
        .sum::<f64>()
        .sqrt()
}

fn reference_points(col: &[Interval], direction: Direction) -> (Interval, Interval) {
    let min_l = col.iter().map(Interval::lower).fold(f64::INFINITY, f64::min);
    let max_l = col.iter().map(Interval::lower).fold(f64::NEG_INFINITY, f64::max);
    let min_u = col.iter().map(Interval::upper).fold(f64::INFINITY, f64::min);
    let max_u = col.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max);
    let high = Interval::spanning(max_l, max_u);
    let low = Interval::spanning(min_l, min_u);
    match direction {
        Direction::HigherBetter => (high, low),
        Direction::LowerBetter => (low, high),
    }
}

impl RankingAlgorithm for IntervalTopsis {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports_intervals(&self) -> bool {
        true
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, true)?;

        let matrix = problem.interval_matrix();
        let weights = problem.normalized_weights();

        // Column-major weighted normalized intervals.
        let weighted: Vec<Vec<Interval>> = (0..problem.criterion_count())
            .map(|j| {
                let col = column(&matrix, j);
                let norm = (col
                    .iter()
                    .map(|x| (x.lower() * x.lower() + x.upper() * x.upper()) / 2.0)
                    .sum::<f64>())
                .sqrt();
                col.iter()
                    .map(|x| {
                        if norm == 0.0 {
                            Interval::point(0.0)
                        } else {
                            Interval::spanning(x.lower() / norm * weights[j], x.upper() / norm * weights[j])
                        }
                    })
                    .collect()
            })
            .collect();

        let (ideal, negative_ideal): (Vec<Interval>, Vec<Interval>) = problem
            .criteria()
            .iter()
            .zip(&weighted)
            .map(|(criterion, col)| reference_points(col, criterion.direction()))
            .unzip();

        let mut to_ideal = Vec::with_capacity(problem.alternative_count());
        let mut to_negative = Vec::with_capacity(problem.alternative_count());
        for i in 0..problem.alternative_count() {
            let row: Vec<Interval> = weighted.iter().map(|col| col[i]).collect();
            to_ideal.push(interval_distance(&row, &ideal));
            to_negative.push(interval_distance(&row, &negative_ideal));
        }

        let scores: Vec<f64> = to_ideal
            .iter()
            .zip(&to_negative)
            .map(|(&plus, &minus)| closeness(plus, minus))
            .collect();

        let alternatives = problem.alternatives();
        let metadata = ResultMetadata::new(Self::NAME, ScoreOrder::Descending)
            .with_metric("distance_to_ideal", MetricValue::by_alternative(alternatives, &to_ideal))
            .with_metric(
                "distance_to_negative_ideal",
                MetricValue::by_alternative(alternatives, &to_negative),
            );
        Ok(DecisionResult::from_scores(alternatives, &scores, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::fixtures;
    use super::super::Topsis;
    use super::*;

    #[test]
    fn point_intervals_match_crisp_topsis() {
        let crisp = fixtures::supplier_choice();
        let lifted = fixtures::as_point_intervals(&crisp);
        let expected = Topsis.compute(&crisp).unwrap();
        let actual = IntervalTopsis.compute(&lifted).unwrap();
        fixtures::assert_equivalent(&expected, &actual, 1e-9);
    }

    #[test]
    fn ranks_interval_problem_within_unit_range() {
        let result = IntervalTopsis.compute(&fixtures::uncertain_vendors()).unwrap();
        assert_eq!(result.rankings.len(), 3);
        assert!(result.rankings.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert_eq!(result.metadata.algorithm_name, "interval_topsis");
        assert_eq!(result.ordered_alternatives().last(), Some(&"gamma"));
    }

    #[test]
    fn identical_alternatives_score_one_half() {
        let lifted = fixtures::as_point_intervals(&fixtures::identical_pair());
        let result = IntervalTopsis.compute(&lifted).unwrap();
        assert_eq!(result.score_of("first"), Some(0.5));
        assert_eq!(result.score_of("second"), Some(0.5));
    }

    #[test]
    fn reference_points_follow_direction() {
        let col = [Interval::new(1.0, 4.0).unwrap(), Interval::new(2.0, 3.0).unwrap()];
        let (ideal, negative) = reference_points(&col, Direction::HigherBetter);
        assert_eq!(ideal, Interval::new(2.0, 4.0).unwrap());
        assert_eq!(negative, Interval::new(1.0, 3.0).unwrap());
        let (ideal, _) = reference_points(&col, Direction::LowerBetter);
        assert_eq!(ideal, Interval::new(1.0, 3.0).unwrap());
    }
}
