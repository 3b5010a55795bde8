//! Interval value object for uncertain scores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use super::ValidationError;

/// A closed interval `[lower, upper]` of finite reals.
///
/// Degenerate intervals (`lower == upper`) behave as exact numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IntervalRepr")]
pub struct Interval {
    lower: f64,
    upper: f64,
}

#[derive(Deserialize)]
struct IntervalRepr {
    lower: f64,
    upper: f64,
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = ValidationError;

    fn try_from(repr: IntervalRepr) -> Result<Self, Self::Error> {
        Interval::new(repr.lower, repr.upper)
    }
}

impl Interval {
    /// Creates an interval, rejecting inverted or non-finite bounds.
    pub fn new(lower: f64, upper: f64) -> Result<Self, ValidationError> {
        if !lower.is_finite() {
            return Err(ValidationError::invalid_value(
                "interval.lower",
                lower,
                "must be finite",
            ));
        }
        if !upper.is_finite() {
            return Err(ValidationError::invalid_value(
                "interval.upper",
                upper,
                "must be finite",
            ));
        }
        if lower > upper {
            return Err(ValidationError::InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Creates a zero-width interval around `value`.
    pub fn point(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    /// Builds an interval from two bounds in any order.
    pub(crate) fn spanning(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Returns `(lower + upper) / 2`.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Returns `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns true if the interval has zero width.
    pub fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }

    /// Returns true if `value` lies within the closed interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Interval addition: `[a.l + b.l, a.u + b.u]`.
    pub fn add(&self, other: &Interval) -> Interval {
        Interval {
            lower: self.lower + other.lower,
            upper: self.upper + other.upper,
        }
    }

    /// Interval subtraction: `[a.l - b.u, a.u - b.l]`.
    pub fn subtract(&self, other: &Interval) -> Interval {
        Interval {
            lower: self.lower - other.upper,
            upper: self.upper - other.lower,
        }
    }

    /// Multiplies both bounds by `factor`, swapping them when it is negative.
    pub fn scale(&self, factor: f64) -> Interval {
        Interval::spanning(self.lower * factor, self.upper * factor)
    }

    /// Applies a non-decreasing function to both bounds.
    pub(crate) fn map_monotone(&self, f: impl Fn(f64) -> f64) -> Interval {
        Interval::spanning(f(self.lower), f(self.upper))
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        Interval {
            lower: self.lower + rhs.lower,
            upper: self.upper + rhs.upper,
        }
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        self.subtract(&rhs)
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, rhs: f64) -> Interval {
        self.scale(rhs)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
