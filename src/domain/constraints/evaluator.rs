//! Veto Evaluator - applies criterion vetoes to every alternative.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::veto::{ConstraintMetadata, VetoAction, VetoCondition, VetoConfig, VetoLogic, VetoPolicy, VetoResult};
use crate::domain::foundation::ConstraintError;
use crate::domain::model::{DecisionProblem, DecisionResult, RankingItem};

/// Veto results for every alternative, in problem order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetoReport {
    pub results: Vec<VetoResult>,
    pub metadata: ConstraintMetadata,
}

impl VetoReport {
    pub fn new(results: Vec<VetoResult>) -> Self {
        let metadata = ConstraintMetadata::from_results(&results);
        Self { results, metadata }
    }

    pub fn result_for(&self, alternative: &str) -> Option<&VetoResult> {
        self.results.iter().find(|r| r.alternative == alternative)
    }

    pub fn is_rejected(&self, alternative: &str) -> bool {
        self.result_for(alternative).is_some_and(|r| r.rejected)
    }

    pub fn rejected_alternatives(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| r.rejected)
            .map(|r| r.alternative.as_str())
            .collect()
    }
}

/// Mutable accumulator for one alternative.
#[derive(Default)]
struct Outcome {
    rejected: bool,
    reject_reasons: Vec<String>,
    warnings: Vec<String>,
    penalties: BTreeMap<String, f64>,
}

impl Outcome {
    fn apply(&mut self, action: VetoAction, criterion: &str, penalty: f64, message: String) {
        match action {
            VetoAction::Accept => {}
            VetoAction::Warning => {
                self.warnings.push(message);
                self.penalize(criterion, penalty);
            }
            VetoAction::Penalty => self.penalize(criterion, penalty),
            VetoAction::Reject => {
                self.rejected = true;
                self.reject_reasons.push(message);
            }
        }
    }

    fn penalize(&mut self, criterion: &str, penalty: f64) {
        if penalty > 0.0 {
            *self.penalties.entry(criterion.to_string()).or_insert(0.0) += penalty;
        }
    }

    fn into_result(self, alternative: &str) -> VetoResult {
        VetoResult::new(
            alternative,
            self.rejected,
            self.reject_reasons,
            self.warnings,
            self.penalties,
        )
    }
}

/// Stateless veto evaluation and policy application.
pub struct VetoEvaluator;

impl VetoEvaluator {
    /// Evaluates every criterion veto against every alternative.
    ///
    /// Interval scores are compared on their midpoint. Configurations are
    /// validated up front, so an error never leaves a partial report.
    ///
    /// # Errors
    ///
    /// - Structural `ConstraintError`s from deserialized configurations
    /// - `UnknownCriterion` when a condition references a missing criterion
    pub fn evaluate(problem: &DecisionProblem) -> Result<VetoReport, ConstraintError> {
        for criterion in problem.criteria() {
            let Some(veto) = criterion.veto() else {
                continue;
            };
            veto.validate()?;
            for referenced in veto.referenced_criteria() {
                if problem.criterion(referenced).is_none() {
                    return Err(ConstraintError::UnknownCriterion {
                        criterion: criterion.name().to_string(),
                        referenced: referenced.to_string(),
                    });
                }
            }
        }

        let results: Vec<VetoResult> = problem
            .alternatives()
            .iter()
            .map(|alt| Self::evaluate_alternative(problem, alt))
            .collect();
        let report = VetoReport::new(results);

        debug!(
            total = report.metadata.total,
            rejected = report.metadata.rejected,
            warned = report.metadata.warned,
            "Evaluated vetoes"
        );
        Ok(report)
    }

    fn evaluate_alternative(problem: &DecisionProblem, alternative: &str) -> VetoResult {
        let mut outcome = Outcome::default();
        let value_of = |criterion: &str| {
            problem
                .score(alternative, criterion)
                .map(|score| score.midpoint())
                .unwrap_or(f64::NAN)
        };
        let satisfied = |condition: &VetoCondition, owner: &str| {
            condition.is_satisfied(value_of(condition.target(owner)))
        };

        for criterion in problem.criteria() {
            let Some(veto) = criterion.veto() else {
                continue;
            };
            let owner = criterion.name();

            match veto {
                VetoConfig::Hard {
                    condition,
                    reject_reason,
                } => {
                    if !satisfied(condition, owner) {
                        let reason = reject_reason.clone().unwrap_or_else(|| {
                            format!(
                                "{}: {} violates {}",
                                owner,
                                value_of(condition.target(owner)),
                                condition
                            )
                        });
                        outcome.apply(VetoAction::Reject, owner, 0.0, reason);
                    }
                }
                VetoConfig::Soft {
                    condition,
                    action,
                    penalty_score,
                    message,
                } => {
                    if !satisfied(condition, owner) {
                        let message = message
                            .clone()
                            .unwrap_or_else(|| format!("{}: outside preferred range {}", owner, condition));
                        outcome.apply(*action, owner, *penalty_score, message);
                    }
                }
                VetoConfig::Tiered { tiers } => {
                    let value = value_of(owner);
                    if let Some(tier) = tiers.iter().find(|t| t.contains(value)) {
                        let message = tier
                            .reason
                            .clone()
                            .unwrap_or_else(|| format!("{}: {} falls in {} tier", owner, value, tier.action));
                        outcome.apply(tier.action, owner, tier.penalty_score, message);
                    }
                }
                VetoConfig::Composite {
                    logic,
                    conditions,
                    action,
                    reject_reason,
                    penalty_score,
                } => {
                    let mut checks = conditions.iter().map(|c| satisfied(c, owner));
                    let combined = match logic {
                        VetoLogic::And => checks.all(|ok| ok),
                        VetoLogic::Or => checks.any(|ok| ok),
                    };
                    if !combined {
                        let message = reject_reason
                            .clone()
                            .unwrap_or_else(|| format!("{}: composite conditions not met", owner));
                        outcome.apply(*action, owner, *penalty_score, message);
                    }
                }
            }
        }

        outcome.into_result(alternative)
    }

    /// Returns the problem to rank under `policy`.
    ///
    /// `Exclude` drops rejected alternatives; `Penalize` keeps the problem as is.
    ///
    /// # Errors
    ///
    /// `ConstraintError::TooFewSurvivors` when `Exclude` leaves fewer than two
    /// alternatives. The error names the survivors and the rejected ones.
    pub fn apply_policy(
        problem: &DecisionProblem,
        report: &VetoReport,
        policy: VetoPolicy,
    ) -> Result<DecisionProblem, ConstraintError> {
        match policy {
            VetoPolicy::Exclude => {
                let kept = problem.retain_alternatives(|alt| !report.is_rejected(alt));
                if kept.alternative_count() < problem.alternative_count() {
                    debug!(
                        excluded = problem.alternative_count() - kept.alternative_count(),
                        "Excluded rejected alternatives"
                    );
                }
                if kept.alternative_count() < 2 {
                    warn!(
                        remaining = kept.alternative_count(),
                        "Vetoes left too few alternatives to rank"
                    );
                    return Err(ConstraintError::TooFewSurvivors {
                        survivors: kept.alternatives().to_vec(),
                        rejected: report
                            .rejected_alternatives()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    });
                }
                Ok(kept)
            }
            VetoPolicy::Penalize => Ok(problem.clone()),
        }
    }

    /// Moves each score by its alternative's total penalty and re-ranks.
    ///
    /// Penalties act against the result's score order, so a penalized
    /// alternative always moves towards the bottom. Alternatives with equal
    /// penalties keep their relative order, and a report without penalties
    /// leaves the ranking untouched.
    pub fn penalize_result(result: DecisionResult, report: &VetoReport) -> DecisionResult {
        let penalties: Vec<f64> = result
            .rankings
            .iter()
            .map(|item: &RankingItem| {
                report
                    .result_for(&item.alternative)
                    .map_or(0.0, |r| r.total_penalty)
            })
            .collect();
        if penalties.iter().all(|&penalty| penalty == 0.0) {
            return result;
        }

        let order = result.metadata.score_order;
        let alternatives: Vec<String> = result
            .rankings
            .iter()
            .map(|item| item.alternative.clone())
            .collect();
        let scores: Vec<f64> = result
            .rankings
            .iter()
            .zip(&penalties)
            .map(|(item, &penalty)| order.penalize(item.score, penalty))
            .collect();

        // Stable over the incoming rank order.
        let mut penalized = DecisionResult::from_scores(&alternatives, &scores, result.metadata);
        penalized.veto_results = result.veto_results;
        penalized.constraint_metadata = result.constraint_metadata;
        penalized.sensitivity = result.sensitivity;
        penalized
    }
}
