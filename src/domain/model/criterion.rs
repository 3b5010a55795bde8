//! Criterion - one weighted dimension of evaluation.

use serde::{Deserialize, Serialize};

use super::ScoringRule;
use crate::domain::constraints::VetoConfig;
use crate::domain::foundation::{Direction, ValidationError};

/// A weighted evaluation criterion with a preference direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CriterionRepr")]
pub struct Criterion {
    name: String,
    weight: f64,
    direction: Direction,
    #[serde(skip_serializing_if = "Option::is_none")]
    scoring_rule: Option<ScoringRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    veto: Option<VetoConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<String>,
}

#[derive(Deserialize)]
struct CriterionRepr {
    name: String,
    weight: f64,
    #[serde(default)]
    direction: Direction,
    #[serde(default)]
    scoring_rule: Option<ScoringRule>,
    #[serde(default)]
    veto: Option<VetoConfig>,
    #[serde(default)]
    column: Option<String>,
}

impl TryFrom<CriterionRepr> for Criterion {
    type Error = ValidationError;

    fn try_from(repr: CriterionRepr) -> Result<Self, Self::Error> {
        let mut criterion = Criterion::new(repr.name, repr.weight, repr.direction)?;
        criterion.scoring_rule = repr.scoring_rule;
        criterion.veto = repr.veto;
        criterion.column = repr.column;
        Ok(criterion)
    }
}

impl Criterion {
    /// Creates a criterion. The name must be non-empty and the weight finite and non-negative.
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        direction: Direction,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("criterion.name"));
        }
        if !weight.is_finite() || weight < 0.0 {
            return Err(ValidationError::invalid_value(
                format!("criterion '{}'.weight", name),
                weight,
                "must be finite and non-negative",
            ));
        }
        Ok(Self {
            name,
            weight,
            direction,
            scoring_rule: None,
            veto: None,
            column: None,
        })
    }

    /// Convenience constructor for a benefit criterion.
    pub fn benefit(name: impl Into<String>, weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, weight, Direction::HigherBetter)
    }

    /// Convenience constructor for a cost criterion.
    pub fn cost(name: impl Into<String>, weight: f64) -> Result<Self, ValidationError> {
        Self::new(name, weight, Direction::LowerBetter)
    }

    /// Attaches a scoring rule.
    pub fn with_scoring_rule(mut self, rule: ScoringRule) -> Self {
        self.scoring_rule = Some(rule);
        self
    }

    /// Attaches a veto configuration.
    pub fn with_veto(mut self, veto: VetoConfig) -> Self {
        self.veto = Some(veto);
        self
    }

    /// Sets the raw-data column this criterion reads from.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Returns a copy with a different weight.
    pub(crate) fn reweighted(&self, weight: f64) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scoring_rule(&self) -> Option<&ScoringRule> {
        self.scoring_rule.as_ref()
    }

    pub fn veto(&self) -> Option<&VetoConfig> {
        self.veto.as_ref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Raw-data field this criterion reads: `column`, or the criterion name.
    pub fn source_field(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LinearRule;

    #[test]
    fn new_rejects_empty_name() {
        assert!(matches!(
            Criterion::benefit("  ", 1.0),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn new_rejects_negative_weight() {
        assert!(Criterion::benefit("quality", -0.1).is_err());
        assert!(Criterion::benefit("quality", f64::NAN).is_err());
    }

    #[test]
    fn zero_weight_is_allowed() {
        assert!(Criterion::benefit("quality", 0.0).is_ok());
    }

    #[test]
    fn source_field_defaults_to_name() {
        let c = Criterion::cost("price", 1.0).unwrap();
        assert_eq!(c.source_field(), "price");
        let c = c.with_column("price_eur");
        assert_eq!(c.source_field(), "price_eur");
    }

    #[test]
    fn builder_methods_attach_rule() {
        let rule = ScoringRule::Linear(LinearRule::percent(0.0, 10.0).unwrap());
        let c = Criterion::benefit("speed", 2.0)
            .unwrap()
            .with_scoring_rule(rule.clone());
        assert_eq!(c.scoring_rule(), Some(&rule));
        assert_eq!(c.direction(), Direction::HigherBetter);
    }

    #[test]
    fn deserializes_with_defaults() {
        let c: Criterion = serde_json::from_str(r#"{"name": "cost", "weight": 0.4}"#).unwrap();
        assert_eq!(c.name(), "cost");
        assert_eq!(c.direction(), Direction::HigherBetter);
        assert!(c.scoring_rule().is_none());
    }

    #[test]
    fn deserialization_validates_weight() {
        let result = serde_json::from_str::<Criterion>(r#"{"name": "cost", "weight": -2}"#);
        assert!(result.is_err());
    }
}
