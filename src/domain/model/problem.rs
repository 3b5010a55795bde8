//! DecisionProblem - alternatives, criteria and the score matrix.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::{Criterion, ScoreValue};
use crate::domain::analysis::ScoringApplier;
use crate::domain::foundation::{EngineError, Interval, ValidationError};

/// Score matrix keyed by alternative, then criterion name.
pub type ScoreMatrix = BTreeMap<String, BTreeMap<String, ScoreValue>>;

/// Raw measurements keyed by alternative, then field name.
pub type RawData = BTreeMap<String, BTreeMap<String, f64>>;

/// Algorithm used when nothing else names one.
pub const DEFAULT_ALGORITHM: &str = "topsis";

/// Algorithm selection and numeric parameters carried by a problem.
///
/// An absent name defers the choice to the caller's configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl AlgorithmConfig {
    /// Creates a config for the named algorithm with no parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            params: BTreeMap::new(),
        }
    }

    /// The requested algorithm, or `topsis` when none was requested.
    pub fn name(&self) -> &str {
        self.requested().unwrap_or(DEFAULT_ALGORITHM)
    }

    /// The algorithm name if one was given explicitly.
    pub fn requested(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns a parameter value if present.
    pub fn param(&self, key: &str) -> Option<f64> {
        self.params.get(key).copied()
    }
}

/// A validated, immutable decision problem.
///
/// Alternative order and criterion order are significant: they define the
/// row and column order of the decision matrix and the tie-break order of
/// every ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DecisionProblemRepr")]
pub struct DecisionProblem {
    alternatives: Vec<String>,
    criteria: Vec<Criterion>,
    scores: ScoreMatrix,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_data: Option<RawData>,
    algorithm: AlgorithmConfig,
    /// Dense rows (alternatives) x columns (criteria), built at validation.
    #[serde(skip)]
    matrix: Vec<Vec<ScoreValue>>,
}

/// Unvalidated wire form of a problem.
#[derive(Deserialize)]
pub(crate) struct DecisionProblemRepr {
    alternatives: Vec<String>,
    criteria: Vec<Criterion>,
    #[serde(default)]
    scores: ScoreMatrix,
    #[serde(default)]
    raw_data: Option<RawData>,
    #[serde(default)]
    algorithm: AlgorithmConfig,
}

impl TryFrom<DecisionProblemRepr> for DecisionProblem {
    type Error = EngineError;

    fn try_from(repr: DecisionProblemRepr) -> Result<Self, Self::Error> {
        DecisionProblemBuilder {
            alternatives: repr.alternatives,
            criteria: repr.criteria,
            scores: repr.scores,
            raw_data: repr.raw_data,
            algorithm: repr.algorithm,
        }
        .build()
    }
}

impl DecisionProblem {
    /// Creates a builder for constructing a decision problem.
    pub fn builder() -> DecisionProblemBuilder {
        DecisionProblemBuilder::new()
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn scores(&self) -> &ScoreMatrix {
        &self.scores
    }

    pub fn raw_data(&self) -> Option<&RawData> {
        self.raw_data.as_ref()
    }

    pub fn algorithm(&self) -> &AlgorithmConfig {
        &self.algorithm
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    /// Looks up a criterion by name.
    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name() == name)
    }

    /// Looks up a score cell.
    pub fn score(&self, alternative: &str, criterion: &str) -> Option<&ScoreValue> {
        self.scores.get(alternative)?.get(criterion)
    }

    /// Returns true if any cell holds an interval.
    pub fn is_interval_valued(&self) -> bool {
        self.matrix.iter().flatten().any(ScoreValue::is_interval)
    }

    /// Returns true if any criterion carries a veto configuration.
    pub fn has_vetoes(&self) -> bool {
        self.criteria.iter().any(|c| c.veto().is_some())
    }

    /// Dense cell matrix: one row per alternative, one column per criterion.
    pub fn cells(&self) -> &[Vec<ScoreValue>] {
        &self.matrix
    }

    /// Crisp matrix; interval cells collapse to their midpoint.
    pub fn crisp_matrix(&self) -> Vec<Vec<f64>> {
        self.matrix
            .iter()
            .map(|row| row.iter().map(ScoreValue::midpoint).collect())
            .collect()
    }

    /// Interval matrix; crisp cells lift to zero-width intervals.
    pub fn interval_matrix(&self) -> Vec<Vec<Interval>> {
        self.matrix
            .iter()
            .map(|row| row.iter().map(ScoreValue::as_interval).collect())
            .collect()
    }

    /// Weights rescaled to sum to 1. All-zero weights fall back to equal weights.
    pub fn normalized_weights(&self) -> Vec<f64> {
        let total: f64 = self.criteria.iter().map(Criterion::weight).sum();
        let n = self.criteria.len();
        if total <= 0.0 {
            return vec![1.0 / n as f64; n];
        }
        self.criteria.iter().map(|c| c.weight() / total).collect()
    }

    /// Returns a new problem with the given weights, one per criterion.
    pub fn with_weights(&self, weights: &[f64]) -> Result<DecisionProblem, ValidationError> {
        if weights.len() != self.criteria.len() {
            return Err(ValidationError::invalid_format(
                "weights",
                format!(
                    "expected {} weights, got {}",
                    self.criteria.len(),
                    weights.len()
                ),
            ));
        }
        let mut criteria = Vec::with_capacity(self.criteria.len());
        for (criterion, &weight) in self.criteria.iter().zip(weights) {
            // Re-run constructor validation on the new weight.
            Criterion::new(criterion.name(), weight, criterion.direction())?;
            criteria.push(criterion.reweighted(weight));
        }
        Ok(DecisionProblem {
            criteria,
            ..self.clone()
        })
    }

    /// Returns a new problem keeping only the alternatives accepted by `keep`.
    ///
    /// Order is preserved. The result may hold fewer than two alternatives;
    /// algorithms reject such problems.
    pub fn retain_alternatives(&self, keep: impl Fn(&str) -> bool) -> DecisionProblem {
        let mut alternatives = Vec::new();
        let mut matrix = Vec::new();
        for (alt, row) in self.alternatives.iter().zip(&self.matrix) {
            if keep(alt) {
                alternatives.push(alt.clone());
                matrix.push(row.clone());
            }
        }
        let scores = self
            .scores
            .iter()
            .filter(|(alt, _)| keep(alt))
            .map(|(alt, row)| (alt.clone(), row.clone()))
            .collect();
        let raw_data = self.raw_data.as_ref().map(|raw| {
            raw.iter()
                .filter(|(alt, _)| keep(alt))
                .map(|(alt, row)| (alt.clone(), row.clone()))
                .collect()
        });
        DecisionProblem {
            alternatives,
            criteria: self.criteria.clone(),
            scores,
            raw_data,
            algorithm: self.algorithm.clone(),
            matrix,
        }
    }
}

/// Builder for constructing validated DecisionProblem instances.
#[derive(Debug, Default)]
pub struct DecisionProblemBuilder {
    alternatives: Vec<String>,
    criteria: Vec<Criterion>,
    scores: ScoreMatrix,
    raw_data: Option<RawData>,
    algorithm: AlgorithmConfig,
}

impl DecisionProblemBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alternatives.
    pub fn alternatives(mut self, ids: Vec<impl Into<String>>) -> Self {
        self.alternatives = ids.into_iter().map(|s| s.into()).collect();
        self
    }

    /// Appends a criterion.
    pub fn criterion(mut self, criterion: Criterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Sets all criteria.
    pub fn criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets a score cell.
    pub fn score(
        mut self,
        alternative: impl Into<String>,
        criterion: impl Into<String>,
        value: impl Into<ScoreValue>,
    ) -> Self {
        self.scores
            .entry(alternative.into())
            .or_default()
            .insert(criterion.into(), value.into());
        self
    }

    /// Sets a full row of crisp scores in criterion order.
    pub fn row(mut self, alternative: impl Into<String>, values: &[f64]) -> Self {
        let alternative = alternative.into();
        let names: Vec<String> = self.criteria.iter().map(|c| c.name().to_string()).collect();
        let row = self.scores.entry(alternative).or_default();
        for (name, &value) in names.into_iter().zip(values) {
            row.insert(name, ScoreValue::Crisp(value));
        }
        self
    }

    /// Replaces the score matrix.
    pub fn scores(mut self, scores: ScoreMatrix) -> Self {
        self.scores = scores;
        self
    }

    /// Sets a raw measurement.
    pub fn raw_value(
        mut self,
        alternative: impl Into<String>,
        field: impl Into<String>,
        value: f64,
    ) -> Self {
        self.raw_data
            .get_or_insert_with(RawData::new)
            .entry(alternative.into())
            .or_default()
            .insert(field.into(), value);
        self
    }

    /// Replaces the raw data.
    pub fn raw_data(mut self, raw_data: RawData) -> Self {
        self.raw_data = Some(raw_data);
        self
    }

    /// Selects the algorithm by name.
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm.name = Some(name.into());
        self
    }

    /// Sets an algorithm parameter.
    pub fn param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.algorithm.params.insert(key.into(), value);
        self
    }

    /// Validates and builds the problem.
    ///
    /// When raw data is present, scoring rules are applied first and the
    /// derived scores override any supplied for the same cell.
    pub fn build(self) -> Result<DecisionProblem, EngineError> {
        if self.alternatives.is_empty() {
            return Err(ValidationError::empty_field("alternatives").into());
        }
        let mut seen = HashSet::new();
        for alt in &self.alternatives {
            if alt.trim().is_empty() {
                return Err(ValidationError::empty_field("alternative").into());
            }
            if !seen.insert(alt.as_str()) {
                return Err(ValidationError::duplicate("alternative", alt.clone()).into());
            }
        }

        if self.criteria.is_empty() {
            return Err(ValidationError::NoCriteria.into());
        }
        let mut names = HashSet::new();
        for criterion in &self.criteria {
            if !names.insert(criterion.name()) {
                return Err(ValidationError::duplicate("criterion", criterion.name()).into());
            }
        }

        let mut scores = self.scores;
        if let Some(raw) = &self.raw_data {
            let derived = ScoringApplier::apply(&self.alternatives, &self.criteria, raw)?;
            for (alt, row) in derived {
                scores.entry(alt).or_default().extend(row);
            }
        }

        if let Some(unknown) = scores.keys().find(|alt| !seen.contains(alt.as_str())) {
            return Err(ValidationError::UnknownAlternative(unknown.clone()).into());
        }

        let mut matrix = Vec::with_capacity(self.alternatives.len());
        for alt in &self.alternatives {
            let mut row = Vec::with_capacity(self.criteria.len());
            for criterion in &self.criteria {
                let cell = scores
                    .get(alt)
                    .and_then(|r| r.get(criterion.name()))
                    .ok_or_else(|| ValidationError::missing_score(alt.clone(), criterion.name()))?;
                if !cell.is_finite() {
                    return Err(ValidationError::invalid_value(
                        format!("scores.{}.{}", alt, criterion.name()),
                        cell.midpoint(),
                        "must be finite",
                    )
                    .into());
                }
                row.push(*cell);
            }
            matrix.push(row);
        }

        Ok(DecisionProblem {
            alternatives: self.alternatives,
            criteria: self.criteria,
            scores,
            raw_data: self.raw_data,
            algorithm: self.algorithm,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Direction, ScoringError};
    use crate::domain::model::{LinearRule, ScoringRule};

    fn simple() -> DecisionProblem {
        DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(Criterion::benefit("quality", 2.0).unwrap())
            .criterion(Criterion::cost("price", 1.0).unwrap())
            .row("A", &[8.0, 100.0])
            .row("B", &[6.0, 80.0])
            .build()
            .unwrap()
    }

    #[test]
    fn build_creates_dense_matrix_in_declared_order() {
        let problem = simple();
        assert_eq!(problem.crisp_matrix(), vec![vec![8.0, 100.0], vec![6.0, 80.0]]);
        assert!(!problem.is_interval_valued());
    }

    #[test]
    fn build_rejects_empty_alternatives() {
        let result = DecisionProblem::builder()
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::EmptyField { .. }))
        ));
    }

    #[test]
    fn build_rejects_duplicate_alternatives() {
        let result = DecisionProblem::builder()
            .alternatives(vec!["A", "A"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .row("A", &[1.0])
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn build_rejects_duplicate_criteria() {
        let result = DecisionProblem::builder()
            .alternatives(vec!["A"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .criterion(Criterion::cost("q", 1.0).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn build_rejects_missing_score() {
        let result = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .row("A", &[1.0])
            .build();
        match result {
            Err(EngineError::Validation(ValidationError::MissingScore {
                alternative,
                criterion,
            })) => {
                assert_eq!(alternative, "B");
                assert_eq!(criterion, "q");
            }
            other => panic!("Expected MissingScore, got {:?}", other),
        }
    }

    #[test]
    fn build_rejects_scores_for_unknown_alternative() {
        let result = DecisionProblem::builder()
            .alternatives(vec!["A"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .row("A", &[1.0])
            .row("Z", &[1.0])
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Validation(ValidationError::UnknownAlternative(_)))
        ));
    }

    #[test]
    fn build_applies_scoring_rules_to_raw_data() {
        let rule = ScoringRule::Linear(LinearRule::percent(0.0, 10.0).unwrap());
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(
                Criterion::benefit("speed", 1.0)
                    .unwrap()
                    .with_scoring_rule(rule)
                    .with_column("kmh"),
            )
            .raw_value("A", "kmh", 5.0)
            .raw_value("B", "kmh", 10.0)
            .build()
            .unwrap();
        assert_eq!(problem.score("A", "speed"), Some(&ScoreValue::Crisp(50.0)));
        assert_eq!(problem.score("B", "speed"), Some(&ScoreValue::Crisp(100.0)));
    }

    #[test]
    fn build_surfaces_scoring_errors() {
        let rule = ScoringRule::Linear(LinearRule::percent(0.0, 10.0).unwrap());
        let result = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(Criterion::benefit("speed", 1.0).unwrap().with_scoring_rule(rule))
            .raw_value("A", "speed", 5.0)
            .build();
        assert!(matches!(
            result,
            Err(EngineError::Scoring(ScoringError::MissingField { .. }))
        ));
    }

    #[test]
    fn interval_cells_mark_problem_interval_valued() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .score("A", "q", Interval::new(1.0, 3.0).unwrap())
            .score("B", "q", 2.0)
            .build()
            .unwrap();
        assert!(problem.is_interval_valued());
        assert_eq!(problem.crisp_matrix(), vec![vec![2.0], vec![2.0]]);
        assert_eq!(problem.interval_matrix()[1][0], Interval::point(2.0));
    }

    #[test]
    fn normalized_weights_sum_to_one() {
        let weights = simple().normalized_weights();
        assert!((weights[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((weights[1] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_weights_fall_back_to_equal() {
        let problem = simple().with_weights(&[0.0, 0.0]).unwrap();
        assert_eq!(problem.normalized_weights(), vec![0.5, 0.5]);
    }

    #[test]
    fn with_weights_returns_new_problem() {
        let original = simple();
        let changed = original.with_weights(&[1.0, 3.0]).unwrap();
        assert_eq!(original.criteria()[0].weight(), 2.0);
        assert_eq!(changed.criteria()[1].weight(), 3.0);
        assert_eq!(changed.criteria()[1].direction(), Direction::LowerBetter);
        assert!(original.with_weights(&[1.0]).is_err());
        assert!(original.with_weights(&[1.0, -1.0]).is_err());
    }

    #[test]
    fn retain_alternatives_preserves_order() {
        let problem = DecisionProblem::builder()
            .alternatives(vec!["A", "B", "C"])
            .criterion(Criterion::benefit("q", 1.0).unwrap())
            .row("A", &[1.0])
            .row("B", &[2.0])
            .row("C", &[3.0])
            .build()
            .unwrap();
        let kept = problem.retain_alternatives(|alt| alt != "B");
        assert_eq!(kept.alternatives(), &["A".to_string(), "C".to_string()]);
        assert_eq!(kept.crisp_matrix(), vec![vec![1.0], vec![3.0]]);
        assert!(kept.score("B", "q").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let problem = simple();
        let json = serde_json::to_string(&problem).unwrap();
        let parsed: DecisionProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, problem);
    }

    #[test]
    fn algorithm_config_defaults_to_topsis() {
        let problem = simple();
        assert_eq!(problem.algorithm().name(), "topsis");
        assert_eq!(problem.algorithm().requested(), None);
        assert_eq!(problem.algorithm().param("v"), None);
    }
}
