//! Result Renderer Port - turns ranking results into documents.

use crate::domain::foundation::EngineError;
use crate::domain::model::DecisionResult;

/// Port for rendering a `DecisionResult`.
pub trait ResultRenderer: Send + Sync {
    /// Output format name.
    fn format(&self) -> &str;

    /// Render a result.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Render` if serialization fails.
    fn render(&self, result: &DecisionResult) -> Result<String, EngineError>;
}
