//! Result Cache Port - memoizes ranking results.
//!
//! Problems are immutable and algorithms are deterministic, so a result
//! can be reused whenever the registry entry, its configuration and the
//! serialized problem match.

use crate::domain::algorithms::RankingAlgorithm;
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult};

/// Cache key derived from a registry entry and a problem.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct CacheKey {
    algorithm: String,
    configuration: String,
    problem: String,
}

impl CacheKey {
    /// Builds a key from the registry name, the algorithm's configuration and
    /// the serialized problem.
    ///
    /// `registered_as` is the name the algorithm was looked up by, which may
    /// be an alias of `algorithm.name()`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Render` if the problem cannot be serialized.
    pub fn new(
        registered_as: impl Into<String>,
        algorithm: &dyn RankingAlgorithm,
        problem: &DecisionProblem,
    ) -> Result<Self, EngineError> {
        let problem = serde_json::to_string(problem).map_err(|e| EngineError::Render(e.to_string()))?;
        Ok(Self {
            algorithm: registered_as.into(),
            configuration: format!("{}:{}", algorithm.name(), algorithm.configuration()),
            problem,
        })
    }

    /// Registry name the cached result was computed under.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }
}

/// Port for caching results.
///
/// Implementations should be thread-safe and support concurrent access.
pub trait ResultCache: Send + Sync {
    /// Look up a cached result.
    fn get(&self, key: &CacheKey) -> Option<DecisionResult>;

    /// Store a result, replacing any previous entry for the key.
    fn put(&self, key: CacheKey, result: DecisionResult);
}
