//! JSON Result Renderer

use crate::domain::foundation::EngineError;
use crate::domain::model::DecisionResult;
use crate::ports::ResultRenderer;

/// Renders results as JSON with `serde_json`.
#[derive(Debug, Clone, Copy)]
pub struct JsonResultRenderer {
    pretty: bool,
}

impl JsonResultRenderer {
    /// Indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonResultRenderer {
    fn default() -> Self {
        Self::pretty()
    }
}

impl ResultRenderer for JsonResultRenderer {
    fn format(&self) -> &str {
        "json"
    }

    fn render(&self, result: &DecisionResult) -> Result<String, EngineError> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(result)
        } else {
            serde_json::to_string(result)
        };
        rendered.map_err(|e| EngineError::Render(e.to_string()))
    }
}
