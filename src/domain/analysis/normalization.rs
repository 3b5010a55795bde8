//! Normalization Service - rescales criterion columns onto comparable scales.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Direction, Interval};
use crate::domain::model::DecisionProblem;

/// Floor applied to the sigmoid spread.
pub const SIGMA_EPSILON: f64 = 1e-9;

/// Parameters of the logistic normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    /// Steepness `k`.
    #[serde(default = "default_steepness")]
    pub steepness: f64,
    /// Center `μ`; the column mean when absent.
    #[serde(default)]
    pub center: Option<f64>,
    /// Spread `σ`; the column standard deviation when absent.
    #[serde(default)]
    pub spread: Option<f64>,
}

fn default_steepness() -> f64 {
    1.0
}

impl Default for SigmoidParams {
    fn default() -> Self {
        Self {
            steepness: default_steepness(),
            center: None,
            spread: None,
        }
    }
}

/// Column normalization method.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMethod {
    #[default]
    MinMax,
    Vector,
    Sigmoid(SigmoidParams),
}

/// Normalized decision matrix: rows are alternatives, columns are criteria.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMatrix {
    pub rows: Vec<Vec<f64>>,
}

impl NormalizedMatrix {
    /// Returns column `j` as a vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[j]).collect()
    }
}

/// Stateless normalization functions.
pub struct NormalizationService;

impl NormalizationService {
    /// Normalizes one criterion column.
    ///
    /// # Edge Cases
    /// - Empty column: returns an empty Vec
    /// - Constant column: MinMax yields 1.0, Sigmoid yields 0.5,
    ///   Vector yields an equal unit-norm split
    pub fn normalize(column: &[f64], direction: Direction, method: NormalizationMethod) -> Vec<f64> {
        match method {
            NormalizationMethod::MinMax => Self::min_max(column, direction),
            NormalizationMethod::Vector => Self::vector(column, direction),
            NormalizationMethod::Sigmoid(params) => Self::sigmoid(column, direction, params),
        }
    }

    /// `(x - min)/(max - min)`, or `(max - x)/(max - min)` for cost criteria.
    pub fn min_max(column: &[f64], direction: Direction) -> Vec<f64> {
        let Some((min, max)) = bounds(column) else {
            return Vec::new();
        };
        let range = max - min;
        if range == 0.0 {
            return vec![1.0; column.len()];
        }
        column
            .iter()
            .map(|&x| match direction {
                Direction::HigherBetter => (x - min) / range,
                Direction::LowerBetter => (max - x) / range,
            })
            .collect()
    }

    /// Unit Euclidean norm. Cost columns are reflected (`max + min - x`) first.
    pub fn vector(column: &[f64], direction: Direction) -> Vec<f64> {
        let Some((min, max)) = bounds(column) else {
            return Vec::new();
        };
        let oriented: Vec<f64> = match direction {
            Direction::HigherBetter => column.to_vec(),
            Direction::LowerBetter => column.iter().map(|&x| max + min - x).collect(),
        };
        let norm = euclidean_norm(&oriented);
        if norm == 0.0 {
            let share = 1.0 / (column.len() as f64).sqrt();
            return vec![share; column.len()];
        }
        oriented.iter().map(|&x| x / norm).collect()
    }

    /// Direction-agnostic `x / ||x||`; a zero column stays zero.
    pub fn unit_vector(column: &[f64]) -> Vec<f64> {
        let norm = euclidean_norm(column);
        if norm == 0.0 {
            return vec![0.0; column.len()];
        }
        column.iter().map(|&x| x / norm).collect()
    }

    /// Logistic curve `1 / (1 + exp(-k (x - μ) / σ))`, mirrored for cost criteria.
    pub fn sigmoid(column: &[f64], direction: Direction, params: SigmoidParams) -> Vec<f64> {
        if column.is_empty() {
            return Vec::new();
        }
        let n = column.len() as f64;
        let mean = params
            .center
            .unwrap_or_else(|| column.iter().sum::<f64>() / n);
        let spread = params.spread.unwrap_or_else(|| {
            let variance = column.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
            variance.sqrt()
        });
        let sigma = spread.max(SIGMA_EPSILON);
        column
            .iter()
            .map(|&x| {
                let z = direction.sign() * params.steepness * (x - mean) / sigma;
                1.0 / (1.0 + (-z).exp())
            })
            .collect()
    }

    /// Interval MinMax over the column's lowest lower and highest upper bound.
    pub fn min_max_intervals(column: &[Interval], direction: Direction) -> Vec<Interval> {
        if column.is_empty() {
            return Vec::new();
        }
        let min = column.iter().map(Interval::lower).fold(f64::INFINITY, f64::min);
        let max = column.iter().map(Interval::upper).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        if range == 0.0 {
            return vec![Interval::point(1.0); column.len()];
        }
        column
            .iter()
            .map(|cell| match direction {
                Direction::HigherBetter => {
                    Interval::spanning((cell.lower() - min) / range, (cell.upper() - min) / range)
                }
                Direction::LowerBetter => {
                    Interval::spanning((max - cell.upper()) / range, (max - cell.lower()) / range)
                }
            })
            .collect()
    }

    /// Normalizes every column of a problem (interval cells use midpoints).
    pub fn normalize_problem(problem: &DecisionProblem, method: NormalizationMethod) -> NormalizedMatrix {
        let crisp = problem.crisp_matrix();
        let columns: Vec<Vec<f64>> = problem
            .criteria()
            .iter()
            .enumerate()
            .map(|(j, criterion)| {
                let column: Vec<f64> = crisp.iter().map(|row| row[j]).collect();
                Self::normalize(&column, criterion.direction(), method)
            })
            .collect();

        let rows = (0..problem.alternative_count())
            .map(|i| columns.iter().map(|col| col[i]).collect())
            .collect();
        NormalizedMatrix { rows }
    }
}

fn bounds(column: &[f64]) -> Option<(f64, f64)> {
    if column.is_empty() {
        return None;
    }
    let min = column.iter().copied().fold(f64::INFINITY, f64::min);
    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((min, max))
}

fn euclidean_norm(values: &[f64]) -> f64 {
    values.iter().map(|x| x * x).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < EPS, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn min_max_benefit_and_cost() {
        let col = [2.0, 4.0, 6.0];
        assert_close(&NormalizationService::min_max(&col, Direction::HigherBetter), &[0.0, 0.5, 1.0]);
        assert_close(&NormalizationService::min_max(&col, Direction::LowerBetter), &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn min_max_constant_column_is_one_for_both_directions() {
        let col = [3.0, 3.0, 3.0];
        assert_close(&NormalizationService::min_max(&col, Direction::HigherBetter), &[1.0; 3]);
        assert_close(&NormalizationService::min_max(&col, Direction::LowerBetter), &[1.0; 3]);
    }

    #[test]
    fn single_point_columns_do_not_crash() {
        assert_eq!(NormalizationService::min_max(&[7.0], Direction::HigherBetter), vec![1.0]);
        assert_eq!(
            NormalizationService::sigmoid(&[7.0], Direction::HigherBetter, SigmoidParams::default()),
            vec![0.5]
        );
        assert_eq!(NormalizationService::vector(&[7.0], Direction::LowerBetter), vec![1.0]);
    }

    #[test]
    fn empty_column_yields_empty_output() {
        assert!(NormalizationService::normalize(&[], Direction::HigherBetter, NormalizationMethod::Vector)
            .is_empty());
    }

    #[test]
    fn vector_has_unit_norm_for_both_directions() {
        let col = [3.0, 4.0, 12.0];
        for direction in [Direction::HigherBetter, Direction::LowerBetter] {
            let out = NormalizationService::vector(&col, direction);
            let norm: f64 = out.iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn vector_cost_column_reverses_preference() {
        let out = NormalizationService::vector(&[1.0, 5.0], Direction::LowerBetter);
        assert!(out[0] > out[1]);
    }

    #[test]
    fn vector_zero_column_splits_evenly() {
        let out = NormalizationService::vector(&[0.0, 0.0, 0.0, 0.0], Direction::HigherBetter);
        assert_close(&out, &[0.5; 4]);
    }

    #[test]
    fn sigmoid_is_monotonic_and_bounded() {
        let col = [1.0, 2.0, 3.0, 4.0];
        let out = NormalizationService::sigmoid(&col, Direction::HigherBetter, SigmoidParams::default());
        assert!(out.windows(2).all(|w| w[0] < w[1]));
        assert!(out.iter().all(|&v| v > 0.0 && v < 1.0));

        let out = NormalizationService::sigmoid(&col, Direction::LowerBetter, SigmoidParams::default());
        assert!(out.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn sigmoid_constant_column_is_half() {
        let out = NormalizationService::sigmoid(&[5.0, 5.0], Direction::HigherBetter, SigmoidParams::default());
        assert_close(&out, &[0.5, 0.5]);
    }

    #[test]
    fn sigmoid_respects_supplied_center() {
        let params = SigmoidParams {
            steepness: 1.0,
            center: Some(10.0),
            spread: Some(1.0),
        };
        let out = NormalizationService::sigmoid(&[10.0], Direction::HigherBetter, params);
        assert_close(&out, &[0.5]);
    }

    #[test]
    fn interval_min_max_degenerates_to_crisp() {
        let col = [Interval::point(2.0), Interval::point(4.0), Interval::point(6.0)];
        let out = NormalizationService::min_max_intervals(&col, Direction::LowerBetter);
        let mids: Vec<f64> = out.iter().map(Interval::midpoint).collect();
        assert_close(&mids, &[1.0, 0.5, 0.0]);
    }

    #[test]
    fn interval_min_max_uses_outer_bounds() {
        let col = [Interval::new(0.0, 2.0).unwrap(), Interval::new(2.0, 4.0).unwrap()];
        let out = NormalizationService::min_max_intervals(&col, Direction::HigherBetter);
        assert_eq!(out[0], Interval::new(0.0, 0.5).unwrap());
        assert_eq!(out[1], Interval::new(0.5, 1.0).unwrap());
    }
}
