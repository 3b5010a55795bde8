//! Helpers shared by the ranking algorithms.

use tracing::debug;

use crate::domain::foundation::{AlgorithmError, Direction, ValidationError};
use crate::domain::model::DecisionProblem;

/// Minimum number of alternatives any algorithm can rank.
pub(crate) const MIN_ALTERNATIVES: usize = 2;

/// Checks the shared preconditions of every algorithm.
pub(crate) fn ensure_rankable(
    problem: &DecisionProblem,
    algorithm: &str,
    supports_intervals: bool,
) -> Result<(), ValidationError> {
    if problem.alternative_count() < MIN_ALTERNATIVES {
        return Err(ValidationError::InsufficientAlternatives {
            required: MIN_ALTERNATIVES,
            actual: problem.alternative_count(),
        });
    }
    if problem.criterion_count() == 0 {
        return Err(ValidationError::NoCriteria);
    }
    if !supports_intervals && problem.is_interval_valued() {
        debug!(algorithm, "Collapsing interval scores to midpoints");
    }
    Ok(())
}

/// Extracts column `j` of a row-major matrix.
pub(crate) fn column<T: Copy>(matrix: &[Vec<T>], j: usize) -> Vec<T> {
    matrix.iter().map(|row| row[j]).collect()
}

/// Most preferred value of a column.
pub(crate) fn best_of(values: &[f64], direction: Direction) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|a, b| direction.best(a, b))
        .unwrap_or(0.0)
}

/// Least preferred value of a column.
pub(crate) fn worst_of(values: &[f64], direction: Direction) -> f64 {
    values
        .iter()
        .copied()
        .reduce(|a, b| direction.worst(a, b))
        .unwrap_or(0.0)
}

/// Reads a parameter from the problem, falling back to `default`, and checks its range.
pub(crate) fn param_in_range(
    problem: &DecisionProblem,
    algorithm: &str,
    key: &str,
    default: f64,
    valid: impl Fn(f64) -> bool,
    reason: &str,
) -> Result<f64, AlgorithmError> {
    let value = problem.algorithm().param(key).unwrap_or(default);
    if !value.is_finite() || !valid(value) {
        return Err(AlgorithmError::invalid_parameter(algorithm, key, value, reason));
    }
    Ok(value)
}

/// Min-max rescales values to `[0, 1]`; a constant set maps to 1.0.
pub(crate) fn rescale_unit(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range == 0.0 {
        return vec![1.0; values.len()];
    }
    values.iter().map(|&v| (v - min) / range).collect()
}
