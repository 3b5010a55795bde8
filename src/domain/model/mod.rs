//! Decision model - problem description and ranking results.
//!
//! All types are immutable value objects. Constructors validate their
//! invariants and derived problems are returned as new instances.

mod criterion;
mod problem;
mod result;
mod score_value;
mod scoring_rule;

pub use criterion::Criterion;
pub(crate) use problem::DecisionProblemRepr;
pub use problem::{
    AlgorithmConfig, DecisionProblem, DecisionProblemBuilder, RawData, ScoreMatrix,
    DEFAULT_ALGORITHM,
};
pub use result::{DecisionResult, MetricValue, RankingItem, ResultMetadata, ScoreOrder};
pub use score_value::ScoreValue;
pub use scoring_rule::{LinearRule, ScoringRule, ThresholdRange, ThresholdRule};
