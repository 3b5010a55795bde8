//! YAML Problem Loader

use crate::domain::foundation::{EngineError, LoadError};
use crate::domain::model::{DecisionProblem, DecisionProblemRepr};
use crate::ports::ProblemLoader;

/// Loads problems from YAML documents via `serde_yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlProblemLoader;

impl YamlProblemLoader {
    pub const FORMAT: &'static str = "yaml";

    pub fn new() -> Self {
        Self
    }
}

impl ProblemLoader for YamlProblemLoader {
    fn format(&self) -> &str {
        Self::FORMAT
    }

    fn load(&self, content: &str) -> Result<DecisionProblem, EngineError> {
        let document: DecisionProblemRepr =
            serde_yaml::from_str(content).map_err(|e| LoadError::new(Self::FORMAT, e.to_string()))?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::io::Write;

    const OFFICES: &str = r#"
alternatives: [downtown, harbor, suburb]
criteria:
  - name: rent
    weight: 0.5
    direction: lower_better
    veto:
      type: hard
      condition: {operator: "<=", value: 5000}
  - name: commute
    weight: 0.5
    scoring_rule:
      type: linear
      min: 0
      max: 60
    column: minutes
raw_data:
  downtown: {minutes: 15}
  harbor: {minutes: 30}
  suburb: {minutes: 60}
scores:
  downtown: {rent: 4800}
  harbor: {rent: 3900}
  suburb: {rent: 5200}
algorithm:
  name: vikor
  params: {v: 0.6}
"#;

    #[test]
    fn loads_raw_data_vetoes_and_params() {
        let problem = YamlProblemLoader.load(OFFICES).unwrap();
        assert_eq!(problem.alternative_count(), 3);
        assert!(problem.has_vetoes());
        assert_eq!(problem.algorithm().param("v"), Some(0.6));
        let commute = problem.score("harbor", "commute").map(|v| v.midpoint());
        assert_eq!(commute, Some(50.0));
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(OFFICES.as_bytes()).unwrap();
        let problem = YamlProblemLoader.load_path(file.path()).unwrap();
        assert_eq!(problem.criterion_count(), 2);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = YamlProblemLoader
            .load_path(std::path::Path::new("/nonexistent/problem.yaml"))
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadFailed);
    }

    #[test]
    fn unknown_veto_type_is_a_load_error() {
        let content = "alternatives: [a, b]\ncriteria:\n  - name: c\n    weight: 1\n    veto: {type: maybe}\nscores:\n  a: {c: 1}\n  b: {c: 2}\n";
        let err = YamlProblemLoader.load(content).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadFailed);
    }
}
