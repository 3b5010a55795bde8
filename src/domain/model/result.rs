//! Ranking results produced by algorithms.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::analysis::SensitivityResult;
use crate::domain::constraints::{ConstraintMetadata, VetoResult};
use crate::domain::foundation::Interval;

/// One alternative's position in a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingItem {
    pub alternative: String,
    /// 1-based rank.
    pub rank: usize,
    pub score: f64,
}

impl RankingItem {
    /// Creates a new ranking item.
    pub fn new(alternative: impl Into<String>, rank: usize, score: f64) -> Self {
        Self {
            alternative: alternative.into(),
            rank,
            score,
        }
    }
}

/// Whether a better alternative has a larger or smaller score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreOrder {
    #[default]
    Descending,
    Ascending,
}

impl ScoreOrder {
    /// Compares two scores so that the better one sorts first.
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        let ord = match self {
            ScoreOrder::Descending => b.partial_cmp(&a),
            ScoreOrder::Ascending => a.partial_cmp(&b),
        };
        ord.unwrap_or(Ordering::Equal)
    }

    /// Moves a score by `penalty` towards the worse end.
    pub fn penalize(&self, score: f64, penalty: f64) -> f64 {
        match self {
            ScoreOrder::Descending => score - penalty,
            ScoreOrder::Ascending => score + penalty,
        }
    }
}

/// Algorithm-specific metric payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Flag(bool),
    Labels(Vec<String>),
    ByAlternative(BTreeMap<String, f64>),
    IntervalsByAlternative(BTreeMap<String, Interval>),
}

impl MetricValue {
    /// Builds a per-alternative metric from parallel slices.
    pub fn by_alternative(alternatives: &[String], values: &[f64]) -> Self {
        MetricValue::ByAlternative(
            alternatives
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect(),
        )
    }

    /// Builds a per-alternative interval metric from parallel slices.
    pub fn intervals_by_alternative(alternatives: &[String], values: &[Interval]) -> Self {
        MetricValue::IntervalsByAlternative(
            alternatives
                .iter()
                .cloned()
                .zip(values.iter().copied())
                .collect(),
        )
    }

    /// Returns the value for `alternative` if this is a per-alternative metric.
    pub fn for_alternative(&self, alternative: &str) -> Option<f64> {
        match self {
            MetricValue::ByAlternative(map) => map.get(alternative).copied(),
            MetricValue::IntervalsByAlternative(map) => map.get(alternative).map(Interval::midpoint),
            _ => None,
        }
    }
}

/// Metadata shared by every algorithm's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub algorithm_name: String,
    pub score_order: ScoreOrder,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricValue>,
}

impl ResultMetadata {
    /// Creates metadata with no metrics.
    pub fn new(algorithm_name: impl Into<String>, score_order: ScoreOrder) -> Self {
        Self {
            algorithm_name: algorithm_name.into(),
            score_order,
            metrics: BTreeMap::new(),
        }
    }

    /// Adds a metric.
    pub fn with_metric(mut self, key: impl Into<String>, value: MetricValue) -> Self {
        self.metrics.insert(key.into(), value);
        self
    }

    /// Looks up a metric.
    pub fn metric(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }
}

/// The outcome of ranking a decision problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub rankings: Vec<RankingItem>,
    pub metadata: ResultMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veto_results: Option<Vec<VetoResult>>,
    /// Rejected, warned and accepted counts over `veto_results`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_metadata: Option<ConstraintMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<SensitivityResult>,
}

impl DecisionResult {
    /// Ranks alternatives by score along `metadata.score_order`.
    ///
    /// Ties keep input order, so equal scores always produce the same ranks.
    pub fn from_scores(alternatives: &[String], scores: &[f64], metadata: ResultMetadata) -> Self {
        let order = metadata.score_order;
        let mut indices: Vec<usize> = (0..alternatives.len()).collect();
        // Stable sort: equal scores keep input order.
        indices.sort_by(|&a, &b| order.compare(scores[a], scores[b]));
        Self::from_order(alternatives, scores, &indices, metadata)
    }

    /// Builds a result from an explicit best-first ordering of indices.
    pub fn from_order(
        alternatives: &[String],
        scores: &[f64],
        order: &[usize],
        metadata: ResultMetadata,
    ) -> Self {
        let rankings = order
            .iter()
            .enumerate()
            .map(|(position, &idx)| RankingItem::new(alternatives[idx].clone(), position + 1, scores[idx]))
            .collect();
        Self {
            rankings,
            metadata,
            veto_results: None,
            constraint_metadata: None,
            sensitivity: None,
        }
    }

    /// Returns the top-ranked item.
    pub fn top(&self) -> Option<&RankingItem> {
        self.rankings.first()
    }

    /// Returns the rank of `alternative`.
    pub fn rank_of(&self, alternative: &str) -> Option<usize> {
        self.rankings
            .iter()
            .find(|item| item.alternative == alternative)
            .map(|item| item.rank)
    }

    /// Returns the score of `alternative`.
    pub fn score_of(&self, alternative: &str) -> Option<f64> {
        self.rankings
            .iter()
            .find(|item| item.alternative == alternative)
            .map(|item| item.score)
    }

    /// Alternatives in rank order.
    pub fn ordered_alternatives(&self) -> Vec<&str> {
        self.rankings.iter().map(|item| item.alternative.as_str()).collect()
    }

    /// Attaches veto results.
    pub fn with_veto_results(mut self, results: Vec<VetoResult>) -> Self {
        self.veto_results = Some(results);
        self
    }

    /// Attaches the veto counts and rates.
    pub fn with_constraint_metadata(mut self, metadata: ConstraintMetadata) -> Self {
        self.constraint_metadata = Some(metadata);
        self
    }

    /// Attaches a sensitivity analysis.
    pub fn with_sensitivity(mut self, sensitivity: SensitivityResult) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alts(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn from_scores_ranks_descending() {
        let result = DecisionResult::from_scores(
            &alts(&["A", "B", "C"]),
            &[0.2, 0.9, 0.5],
            ResultMetadata::new("test", ScoreOrder::Descending),
        );
        assert_eq!(result.ordered_alternatives(), vec!["B", "C", "A"]);
        assert_eq!(result.rank_of("A"), Some(3));
        assert_eq!(result.top().map(|t| t.score), Some(0.9));
    }

    #[test]
    fn from_scores_ranks_ascending() {
        let result = DecisionResult::from_scores(
            &alts(&["A", "B", "C"]),
            &[0.2, 0.9, 0.5],
            ResultMetadata::new("test", ScoreOrder::Ascending),
        );
        assert_eq!(result.ordered_alternatives(), vec!["A", "C", "B"]);
    }

    #[test]
    fn ties_keep_input_order_with_distinct_ranks() {
        let result = DecisionResult::from_scores(
            &alts(&["X", "Y", "Z"]),
            &[0.5, 0.5, 0.5],
            ResultMetadata::new("test", ScoreOrder::Descending),
        );
        assert_eq!(result.ordered_alternatives(), vec!["X", "Y", "Z"]);
        let ranks: Vec<usize> = result.rankings.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn penalize_moves_against_order() {
        assert_eq!(ScoreOrder::Descending.penalize(1.0, 0.25), 0.75);
        assert_eq!(ScoreOrder::Ascending.penalize(1.0, 0.25), 1.25);
    }

    #[test]
    fn metric_lookup_by_alternative() {
        let metric = MetricValue::by_alternative(&alts(&["A", "B"]), &[1.0, 2.0]);
        assert_eq!(metric.for_alternative("B"), Some(2.0));
        assert_eq!(MetricValue::Number(1.0).for_alternative("B"), None);
    }

    #[test]
    fn serializes_stable_field_names() {
        let result = DecisionResult::from_scores(
            &alts(&["A", "B"]),
            &[1.0, 0.0],
            ResultMetadata::new("wsm", ScoreOrder::Descending)
                .with_metric("weight_sum", MetricValue::Number(1.0)),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("rankings").is_some());
        assert_eq!(json["metadata"]["algorithm_name"], "wsm");
        assert_eq!(json["metadata"]["metrics"]["weight_sum"], 1.0);
        assert!(json.get("veto_results").is_none());
        assert!(json.get("constraint_metadata").is_none());
        assert!(json.get("sensitivity").is_none());
    }
}
