//! Algorithm Registry - name-based lookup of ranking algorithms.
//!
//! # Example
//!
//! ```
//! use mcda_engine::domain::algorithms::{AlgorithmRegistry, RankingAlgorithm};
//!
//! let registry = AlgorithmRegistry::with_defaults();
//! let topsis = registry.get("topsis").unwrap();
//! assert_eq!(topsis.name(), "topsis");
//! assert!(registry.get("unknown").is_err());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::electre::{DEFAULT_ALPHA, DEFAULT_BETA};
use super::todim::DEFAULT_THETA;
use super::vikor::DEFAULT_V;
use super::{
    ElectreI, IntervalTodim, IntervalTopsis, IntervalVikor, RankingAlgorithm, Todim, Topsis, Vikor,
    WeightedProduct, WeightedSum,
};
use crate::domain::analysis::NormalizationMethod;
use crate::domain::foundation::AlgorithmError;

/// Default parameters applied to the built-in algorithms.
///
/// Per-problem `algorithm.params` still override these at compute time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmParameters {
    pub wsm_normalization: NormalizationMethod,
    pub vikor_v: f64,
    pub electre_alpha: f64,
    pub electre_beta: f64,
    pub todim_theta: f64,
}

impl Default for AlgorithmParameters {
    fn default() -> Self {
        Self {
            wsm_normalization: NormalizationMethod::MinMax,
            vikor_v: DEFAULT_V,
            electre_alpha: DEFAULT_ALPHA,
            electre_beta: DEFAULT_BETA,
            todim_theta: DEFAULT_THETA,
        }
    }
}

/// Registry of ranking algorithms keyed by name.
///
/// Populated at construction; lookups never mutate it, so a shared
/// registry is safe to use from many threads.
#[derive(Clone, Default)]
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, Arc<dyn RankingAlgorithm>>,
    order: Vec<String>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in algorithm with default parameters.
    pub fn with_defaults() -> Self {
        Self::with_parameters(&AlgorithmParameters::default())
    }

    /// Creates a registry holding every built-in algorithm.
    pub fn with_parameters(params: &AlgorithmParameters) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WeightedSum::new(params.wsm_normalization)));
        registry.register(Arc::new(WeightedProduct));
        registry.register(Arc::new(Topsis));
        registry.register(Arc::new(IntervalTopsis));
        registry.register(Arc::new(Vikor::new(params.vikor_v)));
        registry.register(Arc::new(IntervalVikor::new(params.vikor_v)));
        registry.register(Arc::new(ElectreI::new(params.electre_alpha, params.electre_beta)));
        registry.register(Arc::new(Todim::new(params.todim_theta)));
        registry.register(Arc::new(IntervalTodim::new(params.todim_theta)));
        registry
    }

    /// Registers an algorithm under its own name, replacing any previous entry.
    pub fn register(&mut self, algorithm: Arc<dyn RankingAlgorithm>) {
        let name = algorithm.name().to_string();
        self.register_as(name, algorithm);
    }

    /// Registers an algorithm under an alias.
    ///
    /// Results still carry the algorithm's own name in their metadata.
    pub fn register_as(&mut self, name: impl Into<String>, algorithm: Arc<dyn RankingAlgorithm>) {
        let name = name.into();
        if self.algorithms.insert(name.clone(), algorithm).is_none() {
            self.order.push(name);
        }
    }

    /// Looks up an algorithm by name.
    ///
    /// # Errors
    ///
    /// `AlgorithmError::Unknown` when no algorithm has that name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn RankingAlgorithm>, AlgorithmError> {
        self.algorithms
            .get(name)
            .cloned()
            .ok_or_else(|| AlgorithmError::Unknown(name.to_string()))
    }

    /// Checks if an algorithm is registered.
    pub fn has_algorithm(&self, name: &str) -> bool {
        self.algorithms.contains_key(name)
    }

    /// Returns all registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.algorithms.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns all registered names in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Returns the number of registered algorithms.
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmRegistry")
            .field("algorithms", &self.names())
            .finish()
    }
}
