//! Scoring rules mapping raw measurements onto a score scale.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Closed set of rules for converting a raw value into a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoringRule {
    Linear(LinearRule),
    Threshold(ThresholdRule),
}

impl ScoringRule {
    /// Applies the rule to a raw value.
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            ScoringRule::Linear(rule) => rule.apply(raw),
            ScoringRule::Threshold(rule) => rule.apply(raw),
        }
    }
}

/// Linear interpolation of `[min, max]` onto `[0, scale]`, clamped outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LinearRuleRepr")]
pub struct LinearRule {
    min: f64,
    max: f64,
    scale: f64,
}

#[derive(Deserialize)]
struct LinearRuleRepr {
    min: f64,
    max: f64,
    #[serde(default = "default_scale")]
    scale: f64,
}

fn default_scale() -> f64 {
    100.0
}

impl TryFrom<LinearRuleRepr> for LinearRule {
    type Error = ValidationError;

    fn try_from(repr: LinearRuleRepr) -> Result<Self, Self::Error> {
        LinearRule::new(repr.min, repr.max, repr.scale)
    }
}

impl LinearRule {
    /// Creates a linear rule. `min` must differ from `max` and `scale` must be positive.
    pub fn new(min: f64, max: f64, scale: f64) -> Result<Self, ValidationError> {
        if !min.is_finite() {
            return Err(ValidationError::invalid_value("linear.min", min, "must be finite"));
        }
        if !max.is_finite() {
            return Err(ValidationError::invalid_value("linear.max", max, "must be finite"));
        }
        if min == max {
            return Err(ValidationError::invalid_value(
                "linear.max",
                max,
                "must differ from min",
            ));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ValidationError::invalid_value(
                "linear.scale",
                scale,
                "must be positive",
            ));
        }
        Ok(Self { min, max, scale })
    }

    /// Creates a rule on the default 0-100 scale.
    pub fn percent(min: f64, max: f64) -> Result<Self, ValidationError> {
        Self::new(min, max, default_scale())
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Maps `raw` onto `[0, scale]`.
    ///
    /// A rule with `min > max` maps descending values upward.
    pub fn apply(&self, raw: f64) -> f64 {
        let t = ((raw - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        t * self.scale
    }
}

/// A half-open band `[min, max)` with a fixed score. Absent bounds are unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub score: f64,
}

impl ThresholdRange {
    /// Creates a band.
    pub fn new(min: Option<f64>, max: Option<f64>, score: f64) -> Self {
        Self { min, max, score }
    }

    /// Returns true if `value` falls in `[min, max)`.
    pub fn contains(&self, value: f64) -> bool {
        let above_min = self.min.map_or(true, |min| value >= min);
        let below_max = self.max.map_or(true, |max| value < max);
        above_min && below_max
    }
}

/// Ordered bands with a fallback score for values outside every band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdRuleRepr")]
pub struct ThresholdRule {
    ranges: Vec<ThresholdRange>,
    default_score: f64,
}

#[derive(Deserialize)]
struct ThresholdRuleRepr {
    ranges: Vec<ThresholdRange>,
    #[serde(default)]
    default_score: f64,
}

impl TryFrom<ThresholdRuleRepr> for ThresholdRule {
    type Error = ValidationError;

    fn try_from(repr: ThresholdRuleRepr) -> Result<Self, Self::Error> {
        ThresholdRule::new(repr.ranges, repr.default_score)
    }
}

impl ThresholdRule {
    /// Creates a threshold rule. At least one range is required.
    pub fn new(ranges: Vec<ThresholdRange>, default_score: f64) -> Result<Self, ValidationError> {
        if ranges.is_empty() {
            return Err(ValidationError::empty_field("threshold.ranges"));
        }
        for range in &ranges {
            if let (Some(min), Some(max)) = (range.min, range.max) {
                if min >= max {
                    return Err(ValidationError::invalid_value(
                        "threshold.max",
                        max,
                        format!("must be greater than min {}", min),
                    ));
                }
            }
            if !range.score.is_finite() {
                return Err(ValidationError::invalid_value(
                    "threshold.score",
                    range.score,
                    "must be finite",
                ));
            }
        }
        Ok(Self {
            ranges,
            default_score,
        })
    }

    pub fn ranges(&self) -> &[ThresholdRange] {
        &self.ranges
    }

    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Returns the score of the first band containing `raw`, in declared order.
    pub fn apply(&self, raw: f64) -> f64 {
        self.ranges
            .iter()
            .find(|range| range.contains(raw))
            .map(|range| range.score)
            .unwrap_or(self.default_score)
    }
}
