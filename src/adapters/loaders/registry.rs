//! Loader Registry - problem loaders keyed by format name.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::{JsonProblemLoader, YamlProblemLoader};
use crate::domain::foundation::{EngineError, LoadError};
use crate::domain::model::DecisionProblem;
use crate::ports::ProblemLoader;

/// Registry of problem loaders.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn ProblemLoader>>,
}

impl LoaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the JSON and YAML loaders.
    ///
    /// `yml` is registered as an alias of `yaml`.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonProblemLoader));
        let yaml: Arc<dyn ProblemLoader> = Arc::new(YamlProblemLoader);
        registry.register_as("yml", Arc::clone(&yaml));
        registry.register(yaml);
        registry
    }

    /// Register a loader under its own format name.
    pub fn register(&mut self, loader: Arc<dyn ProblemLoader>) {
        let format = loader.format().to_string();
        self.register_as(format, loader);
    }

    /// Register a loader under an explicit format name.
    pub fn register_as(&mut self, format: impl Into<String>, loader: Arc<dyn ProblemLoader>) {
        self.loaders.insert(format.into().to_ascii_lowercase(), loader);
    }

    /// Get the loader for a format.
    pub fn get(&self, format: &str) -> Option<Arc<dyn ProblemLoader>> {
        self.loaders.get(&format.to_ascii_lowercase()).cloned()
    }

    /// Check if a format is registered.
    pub fn has_format(&self, format: &str) -> bool {
        self.loaders.contains_key(&format.to_ascii_lowercase())
    }

    /// Registered format names, sorted.
    pub fn formats(&self) -> Vec<&str> {
        let mut formats: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        formats.sort_unstable();
        formats
    }

    /// Parse document text in the given format.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` for an unregistered format, otherwise
    /// whatever the loader reports.
    pub fn load(&self, format: &str, content: &str) -> Result<DecisionProblem, EngineError> {
        self.loader_for(format)?.load(content)
    }

    /// Load a problem file, choosing the loader by file extension.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Load` when the extension is missing or unknown.
    pub fn load_path(&self, path: &Path) -> Result<DecisionProblem, EngineError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| LoadError::new("unknown", format!("{} has no file extension", path.display())))?;
        self.loader_for(extension)?.load_path(path)
    }

    fn loader_for(&self, format: &str) -> Result<Arc<dyn ProblemLoader>, LoadError> {
        self.get(format)
            .ok_or_else(|| LoadError::new(format, "no loader registered for this format"))
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::io::Write;

    #[test]
    fn defaults_cover_json_and_yaml() {
        let registry = LoaderRegistry::with_defaults();
        assert_eq!(registry.formats(), vec!["json", "yaml", "yml"]);
        assert!(registry.has_format("YAML"));
        assert_eq!(registry.get("yml").map(|l| l.format().to_string()), Some("yaml".to_string()));
    }

    #[test]
    fn unknown_format_is_a_load_error() {
        let err = LoaderRegistry::with_defaults().load("toml", "").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadFailed);
    }

    #[test]
    fn load_path_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"alternatives": ["a", "b"], "criteria": [{{"name": "c", "weight": 1}}], "scores": {{"a": {{"c": 1}}, "b": {{"c": 2}}}}}}"#
        )
        .unwrap();
        let problem = LoaderRegistry::with_defaults().load_path(file.path()).unwrap();
        assert_eq!(problem.alternative_count(), 2);
    }

    #[test]
    fn load_path_without_extension_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = LoaderRegistry::with_defaults().load_path(file.path()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LoadFailed);
    }
}
