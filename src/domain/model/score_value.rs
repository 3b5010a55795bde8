//! Score cell: crisp number or interval.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Interval;

/// A single cell of the decision matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Crisp(f64),
    Interval(Interval),
}

impl ScoreValue {
    /// Returns true if this cell holds an interval.
    pub fn is_interval(&self) -> bool {
        matches!(self, ScoreValue::Interval(_))
    }

    /// Returns the crisp value, or the midpoint for an interval.
    pub fn midpoint(&self) -> f64 {
        match self {
            ScoreValue::Crisp(v) => *v,
            ScoreValue::Interval(i) => i.midpoint(),
        }
    }

    /// Returns the cell as an interval, lifting crisp values to zero width.
    pub fn as_interval(&self) -> Interval {
        match self {
            ScoreValue::Crisp(v) => Interval::point(*v),
            ScoreValue::Interval(i) => *i,
        }
    }

    /// Returns true if every number in the cell is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            ScoreValue::Crisp(v) => v.is_finite(),
            // Interval construction already rejects non-finite bounds.
            ScoreValue::Interval(_) => true,
        }
    }

    /// Shifts the cell by `delta`.
    pub fn shifted(&self, delta: f64) -> ScoreValue {
        match self {
            ScoreValue::Crisp(v) => ScoreValue::Crisp(v + delta),
            ScoreValue::Interval(i) => ScoreValue::Interval(*i + Interval::point(delta)),
        }
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        ScoreValue::Crisp(value)
    }
}

impl From<Interval> for ScoreValue {
    fn from(value: Interval) -> Self {
        ScoreValue::Interval(value)
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Crisp(v) => write!(f, "{}", v),
            ScoreValue::Interval(i) => write!(f, "{}", i),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crisp_lifts_to_zero_width_interval() {
        let cell = ScoreValue::Crisp(4.0);
        assert!(!cell.is_interval());
        assert_eq!(cell.as_interval(), Interval::point(4.0));
        assert_eq!(cell.midpoint(), 4.0);
    }

    #[test]
    fn interval_midpoint() {
        let cell = ScoreValue::Interval(Interval::new(2.0, 6.0).unwrap());
        assert!(cell.is_interval());
        assert_eq!(cell.midpoint(), 4.0);
    }

    #[test]
    fn deserializes_number_or_object() {
        let crisp: ScoreValue = serde_json::from_str("7.5").unwrap();
        assert_eq!(crisp, ScoreValue::Crisp(7.5));

        let interval: ScoreValue = serde_json::from_str(r#"{"lower": 1, "upper": 3}"#).unwrap();
        assert_eq!(interval, ScoreValue::Interval(Interval::new(1.0, 3.0).unwrap()));
    }

    #[test]
    fn inverted_interval_fails_to_deserialize() {
        let result = serde_json::from_str::<ScoreValue>(r#"{"lower": 3, "upper": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn shifted_moves_both_bounds() {
        let cell = ScoreValue::Interval(Interval::new(1.0, 2.0).unwrap()).shifted(-1.0);
        assert_eq!(cell, ScoreValue::Interval(Interval::new(0.0, 1.0).unwrap()));
    }
}
