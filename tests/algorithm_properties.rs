//! Property tests for the ranking algorithms.
//!
//! Random crisp problems are drawn with small integer scores and weights so
//! that weight scaling by powers of two is exact and rankings can be
//! compared directly.

use std::cmp::Ordering;

use proptest::prelude::*;

use mcda_engine::domain::algorithms::{
    AlgorithmRegistry, IntervalTodim, IntervalTopsis, IntervalVikor, RankingAlgorithm, Todim, Topsis,
    Vikor,
};
use mcda_engine::domain::analysis::possibility::possibility_degree;
use mcda_engine::domain::analysis::NormalizationService;
use mcda_engine::domain::constraints::{ComparisonOperator, VetoCondition, VetoConfig, VetoEvaluator};
use mcda_engine::domain::foundation::{Direction, Interval};
use mcda_engine::domain::model::{
    Criterion, DecisionProblem, DecisionResult, ScoringRule, ThresholdRange, ThresholdRule,
};

// =============================================================================
// Generators
// =============================================================================

fn direction(higher: bool) -> Direction {
    if higher {
        Direction::HigherBetter
    } else {
        Direction::LowerBetter
    }
}

fn build_problem(weights: &[u32], directions: &[bool], rows: &[Vec<u32>]) -> DecisionProblem {
    let alternatives: Vec<String> = (0..rows.len()).map(|i| format!("alt{}", i)).collect();
    let criteria: Vec<Criterion> = weights
        .iter()
        .zip(directions)
        .enumerate()
        .map(|(j, (&w, &higher))| Criterion::new(format!("c{}", j), w as f64, direction(higher)).unwrap())
        .collect();
    let mut builder = DecisionProblem::builder()
        .alternatives(alternatives.clone())
        .criteria(criteria);
    for (alt, row) in alternatives.iter().zip(rows) {
        let values: Vec<f64> = row.iter().map(|&x| x as f64).collect();
        builder = builder.row(alt.clone(), &values);
    }
    builder.build().unwrap()
}

fn problem_strategy() -> impl Strategy<Value = DecisionProblem> {
    (2usize..6, 1usize..4)
        .prop_flat_map(|(n, k)| {
            (
                prop::collection::vec(1u32..10, k),
                prop::collection::vec(any::<bool>(), k),
                prop::collection::vec(prop::collection::vec(1u32..100, k), n),
            )
        })
        .prop_map(|(weights, directions, rows)| build_problem(&weights, &directions, &rows))
}

fn interval_strategy() -> impl Strategy<Value = Interval> {
    (-50.0f64..50.0, 0.0f64..20.0).prop_map(|(lower, width)| Interval::new(lower, lower + width).unwrap())
}

fn scaled(problem: &DecisionProblem, factor: f64) -> DecisionProblem {
    let weights: Vec<f64> = problem.criteria().iter().map(|c| c.weight() * factor).collect();
    problem.with_weights(&weights).unwrap()
}

fn as_point_intervals(problem: &DecisionProblem) -> DecisionProblem {
    let mut builder = DecisionProblem::builder()
        .alternatives(problem.alternatives().to_vec())
        .criteria(problem.criteria().to_vec());
    for (alt, row) in problem.alternatives().iter().zip(problem.crisp_matrix()) {
        for (criterion, value) in problem.criteria().iter().zip(row) {
            builder = builder.score(alt.clone(), criterion.name(), Interval::point(value));
        }
    }
    builder.build().unwrap()
}

fn widened(problem: &DecisionProblem) -> DecisionProblem {
    let mut builder = DecisionProblem::builder()
        .alternatives(problem.alternatives().to_vec())
        .criteria(problem.criteria().to_vec());
    for (i, (alt, row)) in problem.alternatives().iter().zip(problem.crisp_matrix()).enumerate() {
        for (j, (criterion, value)) in problem.criteria().iter().zip(row).enumerate() {
            let width = ((i + 2 * j) % 4) as f64 * 7.5;
            builder = builder.score(alt.clone(), criterion.name(), Interval::new(value, value + width).unwrap());
        }
    }
    builder.build().unwrap()
}

fn with_permissive_veto(problem: &DecisionProblem) -> DecisionProblem {
    let mut criteria = problem.criteria().to_vec();
    criteria[0] = criteria[0]
        .clone()
        .with_veto(VetoConfig::hard(VetoCondition::new(ComparisonOperator::GreaterOrEqual, 0.0)));
    let mut builder = DecisionProblem::builder()
        .alternatives(problem.alternatives().to_vec())
        .criteria(criteria);
    for (alt, row) in problem.alternatives().iter().zip(problem.crisp_matrix()) {
        builder = builder.row(alt.clone(), &row);
    }
    builder.build().unwrap()
}

fn assert_scores_follow_ranks(result: &DecisionResult, name: &str) -> Result<(), TestCaseError> {
    let order = result.metadata.score_order;
    for pair in result.rankings.windows(2) {
        prop_assert!(
            order.compare(pair[0].score, pair[1].score) != Ordering::Greater,
            "algorithm {}: {} ({}) ranked above {} ({})",
            name,
            pair[0].alternative,
            pair[0].score,
            pair[1].alternative,
            pair[1].score
        );
    }
    Ok(())
}

fn assert_same_scores(expected: &DecisionResult, actual: &DecisionResult) -> Result<(), TestCaseError> {
    prop_assert_eq!(expected.rankings.len(), actual.rankings.len());
    for item in &expected.rankings {
        let other = actual.score_of(&item.alternative).unwrap();
        prop_assert!(
            (item.score - other).abs() < 1e-9,
            "{}: {} vs {}",
            item.alternative,
            item.score,
            other
        );
    }
    Ok(())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn every_algorithm_ranks_every_alternative_once(problem in problem_strategy()) {
        let registry = AlgorithmRegistry::with_defaults();
        for name in registry.names() {
            let result = registry.get(name).unwrap().compute(&problem).unwrap();
            let mut ranks: Vec<usize> = result.rankings.iter().map(|r| r.rank).collect();
            ranks.sort_unstable();
            prop_assert_eq!(ranks, (1..=problem.alternative_count()).collect::<Vec<_>>());

            let mut ranked: Vec<&str> = result.ordered_alternatives();
            ranked.sort_unstable();
            let mut expected: Vec<&str> = problem.alternatives().iter().map(String::as_str).collect();
            expected.sort_unstable();
            prop_assert_eq!(ranked, expected, "algorithm {}", name);
        }
    }

    #[test]
    fn scores_follow_rank_order(problem in problem_strategy()) {
        let registry = AlgorithmRegistry::with_defaults();
        let interval = widened(&problem);
        for name in registry.names() {
            let algorithm = registry.get(name).unwrap();
            assert_scores_follow_ranks(&algorithm.compute(&problem).unwrap(), name)?;
            if algorithm.supports_intervals() {
                assert_scores_follow_ranks(&algorithm.compute(&interval).unwrap(), name)?;
            }
        }
    }

    #[test]
    fn permissive_veto_keeps_ranking(problem in problem_strategy()) {
        let registry = AlgorithmRegistry::with_defaults();
        let vetoed = with_permissive_veto(&problem);
        let report = VetoEvaluator::evaluate(&vetoed).unwrap();
        prop_assert_eq!(report.metadata.accepted, problem.alternative_count());
        for name in registry.names() {
            let base = registry.get(name).unwrap().compute(&problem).unwrap();
            let penalized = VetoEvaluator::penalize_result(base.clone(), &report);
            prop_assert_eq!(penalized.ordered_alternatives(), base.ordered_alternatives(), "algorithm {}", name);
        }
    }

    #[test]
    fn scaling_weights_keeps_ranking(
        problem in problem_strategy(),
        factor in prop::sample::select(vec![0.25, 0.5, 2.0, 4.0, 1024.0]),
    ) {
        let registry = AlgorithmRegistry::with_defaults();
        let rescaled = scaled(&problem, factor);
        for name in ["wsm", "wpm", "topsis", "vikor"] {
            let algorithm = registry.get(name).unwrap();
            let base = algorithm.compute(&problem).unwrap();
            let other = algorithm.compute(&rescaled).unwrap();
            prop_assert_eq!(base.ordered_alternatives(), other.ordered_alternatives(), "algorithm {}", name);
        }
    }

    #[test]
    fn min_max_maps_constant_column_to_one(value in -1e6f64..1e6, len in 1usize..8, higher in any::<bool>()) {
        let column = vec![value; len];
        let normalized = NormalizationService::min_max(&column, direction(higher));
        prop_assert!(normalized.iter().all(|&x| x == 1.0));
    }

    #[test]
    fn possibility_degrees_are_complementary(a in interval_strategy(), b in interval_strategy()) {
        let forward = possibility_degree(&a, &b);
        let backward = possibility_degree(&b, &a);
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert!((forward + backward - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_intervals_reproduce_crisp_results(problem in problem_strategy()) {
        let lifted = as_point_intervals(&problem);
        let pairs: [(&dyn RankingAlgorithm, &dyn RankingAlgorithm); 3] = [
            (&Topsis, &IntervalTopsis),
            (&Vikor::default(), &IntervalVikor::default()),
            (&Todim::default(), &IntervalTodim::default()),
        ];
        for (crisp, interval) in pairs {
            let expected = crisp.compute(&problem).unwrap();
            let actual = interval.compute(&lifted).unwrap();
            assert_same_scores(&expected, &actual)?;
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn wsm_ranks_highest_average_first() {
    let problem = DecisionProblem::builder()
        .alternatives(vec!["A1", "A2", "A3"])
        .criterion(Criterion::benefit("c1", 0.33).unwrap())
        .criterion(Criterion::benefit("c2", 0.33).unwrap())
        .criterion(Criterion::benefit("c3", 0.34).unwrap())
        .row("A1", &[10.0, 8.0, 7.0])
        .row("A2", &[9.0, 6.0, 8.0])
        .row("A3", &[8.0, 7.0, 9.0])
        .algorithm("wsm")
        .build()
        .unwrap();
    let result = AlgorithmRegistry::with_defaults()
        .get("wsm")
        .unwrap()
        .compute(&problem)
        .unwrap();
    assert_eq!(result.top().unwrap().alternative, "A1");
}

#[test]
fn threshold_bands_include_their_lower_bound() {
    let rule = ScoringRule::Threshold(
        ThresholdRule::new(
            vec![
                ThresholdRange::new(None, Some(50.0), 40.0),
                ThresholdRange::new(Some(50.0), Some(80.0), 70.0),
                ThresholdRange::new(Some(80.0), None, 100.0),
            ],
            0.0,
        )
        .unwrap(),
    );
    assert_eq!(rule.apply(49.9), 40.0);
    assert_eq!(rule.apply(50.0), 70.0);
    assert_eq!(rule.apply(79.0), 70.0);
    assert_eq!(rule.apply(80.0), 100.0);
    assert_eq!(rule.apply(81.0), 100.0);
}

#[test]
fn topsis_splits_identical_alternatives_evenly() {
    let problem = DecisionProblem::builder()
        .alternatives(vec!["left", "right"])
        .criterion(Criterion::benefit("q", 1.0).unwrap())
        .criterion(Criterion::cost("p", 1.0).unwrap())
        .row("left", &[4.0, 2.0])
        .row("right", &[4.0, 2.0])
        .build()
        .unwrap();
    let result = Topsis.compute(&problem).unwrap();
    let to_ideal = result.metadata.metric("distance_to_ideal").unwrap();
    let to_negative = result.metadata.metric("distance_to_negative_ideal").unwrap();
    for alt in ["left", "right"] {
        assert_eq!(to_ideal.for_alternative(alt), to_negative.for_alternative(alt));
        assert_eq!(result.score_of(alt), Some(0.5));
    }
    assert_eq!(result.ordered_alternatives(), vec!["left", "right"]);
}

#[test]
fn hard_veto_rejects_below_threshold() {
    let veto = VetoConfig::hard(VetoCondition::new(ComparisonOperator::GreaterOrEqual, 60.0));
    let problem = DecisionProblem::builder()
        .alternatives(vec!["low", "high"])
        .criterion(Criterion::benefit("score", 1.0).unwrap().with_veto(veto))
        .row("low", &[40.0])
        .row("high", &[80.0])
        .build()
        .unwrap();
    let report = VetoEvaluator::evaluate(&problem).unwrap();
    assert!(report.result_for("low").unwrap().rejected);
    assert!(!report.result_for("high").unwrap().rejected);
    assert_eq!(report.metadata.rejected, 1);
    assert_eq!(report.metadata.accepted, 1);
}
