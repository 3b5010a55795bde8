//! Sensitivity Analyzer - rank stability under weight perturbation.
//!
//! Each criterion's weight is shifted up and down by `delta`, the remaining
//! weights are rescaled so the total stays 1, and the problem is re-ranked.
//! Every alternative whose rank moves is recorded.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::algorithms::RankingAlgorithm;
use crate::domain::foundation::{AlgorithmError, EngineError};
use crate::domain::model::{DecisionProblem, DecisionResult};

/// One rank change caused by one weight shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationResult {
    pub criterion: String,
    /// Signed shift applied to the criterion's normalized weight.
    pub delta: f64,
    pub alternative: String,
    pub old_rank: usize,
    pub new_rank: usize,
}

/// Sensitivity of the ranking to one criterion's weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSensitivity {
    pub criterion: String,
    /// Number of perturbed rankings computed (no-op shifts are skipped).
    pub runs: usize,
    /// Runs that left the whole ranking unchanged.
    pub stable_runs: usize,
    pub perturbations: Vec<PerturbationResult>,
    /// Largest absolute rank movement of any alternative.
    pub max_rank_shift: usize,
    /// Whether some shift changed the top-ranked alternative.
    pub top_changed: bool,
}

/// Sensitivity of a ranking to every criterion weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub delta: f64,
    pub criteria: Vec<CriterionSensitivity>,
    /// Criteria whose perturbation changed the winner.
    pub critical_criteria: Vec<String>,
    /// Share of runs with an unchanged ranking; 1.0 when nothing ran.
    pub stability_index: f64,
}

impl SensitivityResult {
    /// Looks up the entry for a criterion.
    pub fn criterion(&self, name: &str) -> Option<&CriterionSensitivity> {
        self.criteria.iter().find(|c| c.criterion == name)
    }

    /// Returns true if no perturbation moved any alternative.
    pub fn is_stable(&self) -> bool {
        self.criteria.iter().all(|c| c.perturbations.is_empty())
    }
}

/// Stateless weight-sensitivity analysis.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    pub const DEFAULT_DELTA: f64 = 0.1;

    /// Re-ranks `problem` with every criterion weight shifted by `±delta`.
    ///
    /// When `parallel` is set, criteria are analyzed on the rayon pool;
    /// results are identical to the sequential run and keep criterion order.
    ///
    /// # Errors
    ///
    /// - `AlgorithmError::InvalidParameter` if `delta` is outside `(0, 1]`
    /// - Any error raised by the algorithm on the base or perturbed problems
    pub fn analyze(
        problem: &DecisionProblem,
        algorithm: &dyn RankingAlgorithm,
        delta: f64,
        parallel: bool,
    ) -> Result<SensitivityResult, EngineError> {
        Self::check_delta(delta)?;
        let baseline = algorithm.compute(problem)?;
        Self::analyze_against(problem, algorithm, &baseline, delta, parallel)
    }

    /// Like [`SensitivityAnalyzer::analyze`], comparing against an already computed ranking.
    pub fn analyze_against(
        problem: &DecisionProblem,
        algorithm: &dyn RankingAlgorithm,
        baseline: &DecisionResult,
        delta: f64,
        parallel: bool,
    ) -> Result<SensitivityResult, EngineError> {
        Self::check_delta(delta)?;
        let weights = problem.normalized_weights();
        let analyze_one =
            |index: usize| Self::analyze_criterion(problem, algorithm, baseline, &weights, index, delta);

        let criteria: Vec<CriterionSensitivity> = if parallel {
            (0..weights.len())
                .into_par_iter()
                .map(analyze_one)
                .collect::<Result<_, _>>()?
        } else {
            (0..weights.len()).map(analyze_one).collect::<Result<_, _>>()?
        };

        let runs: usize = criteria.iter().map(|c| c.runs).sum();
        let stable: usize = criteria.iter().map(|c| c.stable_runs).sum();
        let stability_index = if runs == 0 {
            1.0
        } else {
            stable as f64 / runs as f64
        };
        let critical_criteria = criteria
            .iter()
            .filter(|c| c.top_changed)
            .map(|c| c.criterion.clone())
            .collect();

        debug!(
            algorithm = algorithm.name(),
            delta,
            runs,
            stability_index,
            "Sensitivity analysis complete"
        );

        Ok(SensitivityResult {
            delta,
            criteria,
            critical_criteria,
            stability_index,
        })
    }

    fn check_delta(delta: f64) -> Result<(), AlgorithmError> {
        if delta > 0.0 && delta <= 1.0 {
            Ok(())
        } else {
            Err(AlgorithmError::invalid_parameter(
                "sensitivity",
                "delta",
                delta,
                "must be in (0, 1]",
            ))
        }
    }

    /// Normalized weights with `weights[index]` shifted by `shift`.
    ///
    /// The shifted weight is clamped to `[0, 1]` and the others are rescaled
    /// to fill the remainder; if they were all zero the remainder is split
    /// equally. Returns `None` when the clamped shift changes nothing.
    pub fn perturbed_weights(weights: &[f64], index: usize, shift: f64) -> Option<Vec<f64>> {
        if weights.len() < 2 {
            return None;
        }
        let old = weights[index];
        let new = (old + shift).clamp(0.0, 1.0);
        if new == old {
            return None;
        }
        let remainder = 1.0 - new;
        let others_total = 1.0 - old;
        let others = (weights.len() - 1) as f64;
        Some(
            weights
                .iter()
                .enumerate()
                .map(|(j, &w)| {
                    if j == index {
                        new
                    } else if others_total > 0.0 {
                        w / others_total * remainder
                    } else {
                        remainder / others
                    }
                })
                .collect(),
        )
    }

    fn analyze_criterion(
        problem: &DecisionProblem,
        algorithm: &dyn RankingAlgorithm,
        base: &DecisionResult,
        weights: &[f64],
        index: usize,
        delta: f64,
    ) -> Result<CriterionSensitivity, EngineError> {
        let name = problem.criteria()[index].name().to_string();
        let mut entry = CriterionSensitivity {
            criterion: name.clone(),
            runs: 0,
            stable_runs: 0,
            perturbations: Vec::new(),
            max_rank_shift: 0,
            top_changed: false,
        };

        for shift in [delta, -delta] {
            let Some(perturbed) = Self::perturbed_weights(weights, index, shift) else {
                continue;
            };
            let result = algorithm.compute(&problem.with_weights(&perturbed)?)?;
            entry.runs += 1;

            let mut changed = false;
            for item in &base.rankings {
                let Some(new_rank) = result.rank_of(&item.alternative) else {
                    continue;
                };
                if new_rank != item.rank {
                    changed = true;
                    entry.max_rank_shift = entry.max_rank_shift.max(new_rank.abs_diff(item.rank));
                    entry.perturbations.push(PerturbationResult {
                        criterion: name.clone(),
                        delta: shift,
                        alternative: item.alternative.clone(),
                        old_rank: item.rank,
                        new_rank,
                    });
                }
            }
            if !changed {
                entry.stable_runs += 1;
            }
            if base.top().map(|t| &t.alternative) != result.top().map(|t| &t.alternative) {
                entry.top_changed = true;
            }
        }
        Ok(entry)
    }
}
