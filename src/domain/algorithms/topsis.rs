//! TOPSIS - Technique for Order Preference by Similarity to Ideal Solution.

use tracing::debug;

use super::common::{best_of, column, ensure_rankable, worst_of};
use super::RankingAlgorithm;
use crate::domain::analysis::NormalizationService;
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult, MetricValue, ResultMetadata, ScoreOrder};

/// Relative closeness `D- / (D+ + D-)`; 0.5 when both distances are zero.
pub(crate) fn closeness(distance_to_ideal: f64, distance_to_negative_ideal: f64) -> f64 {
    let total = distance_to_ideal + distance_to_negative_ideal;
    if total == 0.0 {
        0.5
    } else {
        distance_to_negative_ideal / total
    }
}

/// Crisp TOPSIS.
///
/// # Algorithm
///
/// 1. Vector-normalize each column (`x / ||column||`), then multiply by weight
/// 2. Ideal = best value per column, negative-ideal = worst, by direction
/// 3. Euclidean distances `D+` and `D-` to both
/// 4. `score = D- / (D+ + D-)`, ranked descending
///
/// # Edge Cases
///
/// - All-zero column: stays zero and contributes no distance
/// - Every alternative identical: all scores are 0.5
#[derive(Debug, Clone, Copy, Default)]
pub struct Topsis;

impl Topsis {
    pub const NAME: &'static str = "topsis";
}

impl RankingAlgorithm for Topsis {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn compute(&self, problem: &DecisionProblem) -> Result<DecisionResult, EngineError> {
        ensure_rankable(problem, Self::NAME, false)?;

        let matrix = problem.crisp_matrix();
        let weights = problem.normalized_weights();
        let weighted: Vec<Vec<f64>> = (0..problem.criterion_count())
            .map(|j| {
                NormalizationService::unit_vector(&column(&matrix, j))
                    .into_iter()
                    .map(|v| v * weights[j])
                    .collect()
            })
            .collect();

        let (ideal, negative_ideal): (Vec<f64>, Vec<f64>) = problem
            .criteria()
            .iter()
            .zip(&weighted)
            .map(|(criterion, col)| {
                let direction = criterion.direction();
                (best_of(col, direction), worst_of(col, direction))
            })
            .unzip();

        let mut to_ideal = Vec::with_capacity(problem.alternative_count());
        let mut to_negative = Vec::with_capacity(problem.alternative_count());
        for i in 0..problem.alternative_count() {
            let (mut plus, mut minus) = (0.0, 0.0);
            for (j, col) in weighted.iter().enumerate() {
                plus += (col[i] - ideal[j]).powi(2);
                minus += (col[i] - negative_ideal[j]).powi(2);
            }
            to_ideal.push(plus.sqrt());
            to_negative.push(minus.sqrt());
        }

        let scores: Vec<f64> = to_ideal
            .iter()
            .zip(&to_negative)
            .map(|(&plus, &minus)| closeness(plus, minus))
            .collect();

        debug!(algorithm = Self::NAME, "Computed ideal-solution distances");

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
    use super::*;
    use crate::domain::model::Criterion;

    #[test]
    fn identical_alternatives_score_one_half() {
        let result = Topsis.compute(&fixtures::identical_pair()).unwrap();
        assert_eq!(result.score_of("first"), Some(0.5));
        assert_eq!(result.score_of("second"), Some(0.5));
        assert_eq!(result.ordered_alternatives(), vec!["first", "second"]);
    }

    #[test]
    fn dominant_alternative_scores_one() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["best", "worst"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .criterion(Criterion::cost("p", 1.0).unwrap())
            .row("best", &[9.0, 1.0])
            .row("worst", &[3.0, 4.0])
            .build()
            .unwrap();
        let result = Topsis.compute(&problem).unwrap();
        assert_eq!(result.score_of("best"), Some(1.0));
        assert_eq!(result.score_of("worst"), Some(0.0));
    }

    #[test]
    fn scores_stay_in_unit_range_and_report_distances() {
        let result = Topsis.compute(&fixtures::supplier_choice()).unwrap();
        assert!(result.rankings.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert_eq!(result.top().unwrap().alternative, "north");
        let distances = result.metadata.metric("distance_to_ideal").unwrap();
        assert!(distances.for_alternative("west").unwrap() > distances.for_alternative("north").unwrap());
        assert!(result.metadata.metric("distance_to_negative_ideal").is_some());
    }

    #[test]
    fn zero_column_contributes_nothing() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .criterion(Criterion::benefit("z", 1.0).unwrap())
            .row("A", &[2.0, 0.0])
            .row("B", &[1.0, 0.0])
            .build()
            .unwrap();
        let result = Topsis.compute(&problem).unwrap();
        assert_eq!(result.ordered_alternatives(), vec!["A", "B"]);
        assert_eq!(result.score_of("A"), Some(1.0));
    }

    #[test]
    fn closeness_falls_back_to_half() {
        assert_eq!(closeness(0.0, 0.0), 0.5);
        assert_eq!(closeness(1.0, 3.0), 0.75);
    }
}
