//! Preference direction of a criterion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether larger or smaller values are preferred on a criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    HigherBetter,
    LowerBetter,
}

impl Direction {
    /// Returns true for benefit criteria.
    pub fn is_higher_better(&self) -> bool {
        matches!(self, Direction::HigherBetter)
    }

    /// Returns `+1.0` for benefit criteria and `-1.0` for cost criteria.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::HigherBetter => 1.0,
            Direction::LowerBetter => -1.0,
        }
    }

    /// Returns the preferred of two values.
    pub fn best(&self, a: f64, b: f64) -> f64 {
        match self {
            Direction::HigherBetter => a.max(b),
            Direction::LowerBetter => a.min(b),
        }
    }

    /// Returns the less preferred of two values.
    pub fn worst(&self, a: f64, b: f64) -> f64 {
        match self {
            Direction::HigherBetter => a.min(b),
            Direction::LowerBetter => a.max(b),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::HigherBetter => "higher_better",
            Direction::LowerBetter => "lower_better",
        };
        write!(f, "{}", s)
    }
}
