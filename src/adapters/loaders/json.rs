//! JSON Problem Loader

use crate::domain::foundation::{EngineError, LoadError};
use crate::domain::model::{DecisionProblem, DecisionProblemRepr};
use crate::ports::ProblemLoader;

/// Loads problems from JSON documents via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProblemLoader;

impl JsonProblemLoader {
    pub const FORMAT: &'static str = "json";

    pub fn new() -> Self {
        Self
    }
}

impl ProblemLoader for JsonProblemLoader {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn load(&self, content: &str) -> Result<DecisionProblem, EngineError> {
        let document: DecisionProblemRepr =
            serde_json::from_str(content).map_err(|e| LoadError::new(Self::FORMAT, e.to_string()))?;
        let problem = DecisionProblem::try_from(document)?;
        tracing::debug!(
            format = Self::FORMAT,
            alternatives = problem.alternative_count(),
            criteria = problem.criterion_count(),
            "Loaded decision problem"
        );
        Ok(problem)
    }
}
