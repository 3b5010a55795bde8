//! Scoring Applier - converts raw measurements into scores.

use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::foundation::ScoringError;
use crate::domain::model::{Criterion, RawData, ScoreMatrix, ScoreValue};

/// Applies per-criterion scoring rules to raw data.
pub struct ScoringApplier;

impl ScoringApplier {
    /// Builds a score matrix from raw data.
    ///
    /// # Algorithm
    /// For each alternative and criterion:
    /// - Criterion with a rule: read `column` (or `name`), apply the rule.
    /// - Criterion without a rule: pass the raw value through if present.
    ///
    /// # Errors
    /// The whole operation fails on the first missing or non-finite raw field
    /// of a rule-based criterion; no partial matrix is returned.
    pub fn apply(
        alternatives: &[String],
        criteria: &[Criterion],
        raw_data: &RawData,
    ) -> Result<ScoreMatrix, ScoringError> {
        let mut matrix = ScoreMatrix::new();

        for alt in alternatives {
            let raw_row = raw_data.get(alt);
            let mut row = BTreeMap::new();

            for criterion in criteria {
                let field = criterion.source_field();
                let raw = raw_row.and_then(|r| r.get(field)).copied();

                match (criterion.scoring_rule(), raw) {
                    (Some(rule), Some(value)) => {
                        if !value.is_finite() {
                            return Err(ScoringError::NonFinite {
                                criterion: criterion.name().to_string(),
                                alternative: alt.clone(),
                            });
                        }
                        row.insert(criterion.name().to_string(), ScoreValue::Crisp(rule.apply(value)));
                    }
                    (Some(_), None) => {
                        return Err(ScoringError::MissingField {
                            criterion: criterion.name().to_string(),
                            alternative: alt.clone(),
                            field: field.to_string(),
                        });
                    }
                    (None, Some(value)) => {
                        row.insert(criterion.name().to_string(), ScoreValue::Crisp(value));
                    }
                    // Left for the caller to supply directly.
                    (None, None) => {}
                }
            }

            if !row.is_empty() {
                matrix.insert(alt.clone(), row);
            }
        }

        debug!(
            alternatives = alternatives.len(),
            rules = criteria.iter().filter(|c| c.scoring_rule().is_some()).count(),
            "Applied scoring rules"
        );

        Ok(matrix)
    }
}
