//! Problem Loader Port - reads decision problems from serialized documents.
//!
//! Loaders must go through the validating `DecisionProblem` deserializer so a
//! loaded problem satisfies the same invariants as one built in code.

use std::path::Path;

use crate::domain::foundation::{EngineError, LoadError};
use crate::domain::model::DecisionProblem;

/// Port for parsing decision problems.
///
/// # Contract
///
/// Implementations must:
/// - Report syntax errors and invariant violations as `EngineError`
/// - Never return a problem that skipped build-time validation
pub trait ProblemLoader: Send + Sync {
    /// Format name, e.g. `json` or `yaml`.
    fn format(&self) -> &str;

    /// Parse a problem from document text.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` for malformed documents and the
    /// underlying validation error for well-formed but invalid problems.
    fn load(&self, content: &str) -> Result<DecisionProblem, EngineError>;

    /// Read and parse a problem file.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` if the file cannot be read.
    fn load_path(&self, path: &Path) -> Result<DecisionProblem, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoadError::new(self.format(), format!("cannot read {}: {}", path.display(), e))
        })?;
        self.load(&content)
    }
}
