//! Veto configuration and per-alternative veto outcomes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::ConstraintError;

/// Comparison used by a veto condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl ComparisonOperator {
    /// Evaluates `actual <op> threshold`.
    pub fn holds(&self, actual: f64, threshold: f64) -> bool {
        match self {
            ComparisonOperator::GreaterOrEqual => actual >= threshold,
            ComparisonOperator::Greater => actual > threshold,
            ComparisonOperator::LessOrEqual => actual <= threshold,
            ComparisonOperator::Less => actual < threshold,
            ComparisonOperator::Equal => actual == threshold,
            ComparisonOperator::NotEqual => actual != threshold,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOperator::GreaterOrEqual => ">=",
            ComparisonOperator::Greater => ">",
            ComparisonOperator::LessOrEqual => "<=",
            ComparisonOperator::Less => "<",
            ComparisonOperator::Equal => "==",
            ComparisonOperator::NotEqual => "!=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The acceptable region of a criterion score.
///
/// `criterion` reads another criterion's score; it defaults to the criterion
/// that owns the veto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoCondition {
    pub operator: ComparisonOperator,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
}

impl VetoCondition {
    pub fn new(operator: ComparisonOperator, value: f64) -> Self {
        Self {
            operator,
            value,
            criterion: None,
        }
    }

    /// Points the condition at another criterion's score.
    pub fn on(mut self, criterion: impl Into<String>) -> Self {
        self.criterion = Some(criterion.into());
        self
    }

    /// Returns true if `actual` lies in the acceptable region.
    pub fn is_satisfied(&self, actual: f64) -> bool {
        self.operator.holds(actual, self.value)
    }

    /// Criterion whose score this condition reads.
    pub fn target<'a>(&'a self, owner: &'a str) -> &'a str {
        self.criterion.as_deref().unwrap_or(owner)
    }
}

impl fmt::Display for VetoCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.criterion {
            Some(criterion) => write!(f, "{} {} {}", criterion, self.operator, self.value),
            None => write!(f, "{} {}", self.operator, self.value),
        }
    }
}

/// What happens when a veto triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoAction {
    Accept,
    Warning,
    Penalty,
    Reject,
}

impl fmt::Display for VetoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VetoAction::Accept => "accept",
            VetoAction::Warning => "warning",
            VetoAction::Penalty => "penalty",
            VetoAction::Reject => "reject",
        };
        write!(f, "{}", s)
    }
}

/// One band of a tiered veto: `[min, max)` with optional open ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoTier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub action: VetoAction,
    #[serde(default)]
    pub penalty_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VetoTier {
    /// Creates a tier.
    ///
    /// # Errors
    ///
    /// - `InvertedTier` if both bounds are set and `min >= max`
    /// - `InvalidPenalty` for a negative or non-finite penalty
    pub fn new(
        min: Option<f64>,
        max: Option<f64>,
        action: VetoAction,
        penalty_score: f64,
    ) -> Result<Self, ConstraintError> {
        let tier = Self {
            min,
            max,
            action,
            penalty_score,
            reason: None,
        };
        tier.validate()?;
        Ok(tier)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value < max)
    }

    fn validate(&self) -> Result<(), ConstraintError> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min >= max {
                return Err(ConstraintError::InvertedTier { min, max });
            }
        }
        check_penalty(self.penalty_score)
    }
}

/// How a composite veto combines its conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoLogic {
    #[default]
    And,
    Or,
}

/// Veto configuration attached to a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VetoConfig {
    /// Rejects the alternative when the condition is not satisfied.
    Hard {
        condition: VetoCondition,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reject_reason: Option<String>,
    },
    /// Warns or penalizes when the condition is not satisfied.
    Soft {
        condition: VetoCondition,
        action: VetoAction,
        #[serde(default)]
        penalty_score: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The first tier containing the score decides.
    Tiered { tiers: Vec<VetoTier> },
    /// Combines several conditions; acts when the combination is not satisfied.
    Composite {
        #[serde(default)]
        logic: VetoLogic,
        conditions: Vec<VetoCondition>,
        action: VetoAction,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reject_reason: Option<String>,
        #[serde(default)]
        penalty_score: f64,
    },
}

impl VetoConfig {
    /// Hard veto with a generated reject reason.
    pub fn hard(condition: VetoCondition) -> Self {
        VetoConfig::Hard {
            condition,
            reject_reason: None,
        }
    }

    /// Hard veto with an explicit reject reason.
    pub fn hard_with_reason(condition: VetoCondition, reason: impl Into<String>) -> Self {
        VetoConfig::Hard {
            condition,
            reject_reason: Some(reason.into()),
        }
    }

    /// Soft veto; `action` must be `warning` or `penalty`.
    pub fn soft(
        condition: VetoCondition,
        action: VetoAction,
        penalty_score: f64,
    ) -> Result<Self, ConstraintError> {
        let config = VetoConfig::Soft {
            condition,
            action,
            penalty_score,
            message: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Tiered veto; at least one tier is required.
    pub fn tiered(tiers: Vec<VetoTier>) -> Result<Self, ConstraintError> {
        let config = VetoConfig::Tiered { tiers };
        config.validate()?;
        Ok(config)
    }

    /// Composite veto; at least one condition is required.
    pub fn composite(
        logic: VetoLogic,
        conditions: Vec<VetoCondition>,
        action: VetoAction,
        penalty_score: f64,
    ) -> Result<Self, ConstraintError> {
        let config = VetoConfig::Composite {
            logic,
            conditions,
            action,
            reject_reason: None,
            penalty_score,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks structural invariants.
    ///
    /// Deserialized configurations bypass the constructors, so the evaluator
    /// runs this before evaluating any alternative.
    pub fn validate(&self) -> Result<(), ConstraintError> {
        match self {
            VetoConfig::Hard { .. } => Ok(()),
            VetoConfig::Soft {
                action,
                penalty_score,
                ..
            } => {
                if !matches!(action, VetoAction::Warning | VetoAction::Penalty) {
                    return Err(ConstraintError::InvalidSoftAction(action.to_string()));
                }
                check_penalty(*penalty_score)
            }
            VetoConfig::Tiered { tiers } => {
                if tiers.is_empty() {
                    return Err(ConstraintError::EmptyTiers);
                }
                tiers.iter().try_for_each(VetoTier::validate)
            }
            VetoConfig::Composite {
                conditions,
                penalty_score,
                ..
            } => {
                if conditions.is_empty() {
                    return Err(ConstraintError::EmptyConditions);
                }
                check_penalty(*penalty_score)
            }
        }
    }

    /// Criteria referenced by this veto's conditions, other than the owner.
    pub fn referenced_criteria(&self) -> Vec<&str> {
        let conditions: Vec<&VetoCondition> = match self {
            VetoConfig::Hard { condition, .. } | VetoConfig::Soft { condition, .. } => vec![condition],
            VetoConfig::Tiered { .. } => Vec::new(),
            VetoConfig::Composite { conditions, .. } => conditions.iter().collect(),
        };
        conditions
            .into_iter()
            .filter_map(|c| c.criterion.as_deref())
            .collect()
    }
}

fn check_penalty(penalty: f64) -> Result<(), ConstraintError> {
    if penalty.is_finite() && penalty >= 0.0 {
        Ok(())
    } else {
        Err(ConstraintError::InvalidPenalty(penalty))
    }
}

/// Veto outcome for one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoResult {
    pub alternative: String,
    pub rejected: bool,
    pub reject_reasons: Vec<String>,
    pub warnings: Vec<String>,
    /// Penalty per criterion.
    pub penalties: BTreeMap<String, f64>,
    pub total_penalty: f64,
}

impl VetoResult {
    /// Creates a result with `total_penalty` derived from `penalties`.
    pub fn new(
        alternative: impl Into<String>,
        rejected: bool,
        reject_reasons: Vec<String>,
        warnings: Vec<String>,
        penalties: BTreeMap<String, f64>,
    ) -> Self {
        let total_penalty = penalties.values().fold(0.0, |acc, p| acc + p);
        Self {
            alternative: alternative.into(),
            rejected,
            reject_reasons,
            warnings,
            penalties,
            total_penalty,
        }
    }

    /// A result with nothing triggered.
    pub fn accepted(alternative: impl Into<String>) -> Self {
        Self::new(alternative, false, Vec::new(), Vec::new(), BTreeMap::new())
    }

    /// Overrides the derived total.
    pub fn with_total_penalty(mut self, total_penalty: f64) -> Self {
        self.total_penalty = total_penalty;
        self
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Aggregate counts over a set of veto results.
///
/// `rejected`, `warned` (not rejected, at least one warning) and `accepted`
/// are disjoint and sum to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstraintMetadata {
    pub total: usize,
    pub rejected: usize,
    pub warned: usize,
    pub accepted: usize,
    pub rejection_rate: f64,
    pub warning_rate: f64,
    pub acceptance_rate: f64,
}

impl ConstraintMetadata {
    pub fn from_results(results: &[VetoResult]) -> Self {
        let total = results.len();
        let rejected = results.iter().filter(|r| r.rejected).count();
        let warned = results
            .iter()
            .filter(|r| !r.rejected && r.has_warnings())
            .count();
        let accepted = total - rejected - warned;
        let rate = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };
        Self {
            total,
            rejected,
            warned,
            accepted,
            rejection_rate: rate(rejected),
            warning_rate: rate(warned),
            acceptance_rate: rate(accepted),
        }
    }
}

/// How rejected alternatives are treated before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VetoPolicy {
    /// Remove rejected alternatives from the problem.
    #[default]
    Exclude,
    /// Keep everyone and move scores by their total penalty.
    Penalize,
}
