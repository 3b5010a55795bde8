//! DecisionService - runs a decision problem through the full pipeline.
//!
//! Vetoes are evaluated first, the veto policy shapes the problem that gets
//! ranked, penalties are folded into the scores, and sensitivity analysis
//! optionally re-ranks under weight perturbations.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, info_span};

use crate::config::{ConfigError, EngineConfig};
use crate::domain::algorithms::{AlgorithmRegistry, RankingAlgorithm};
use crate::domain::analysis::SensitivityAnalyzer;
use crate::domain::constraints::{VetoEvaluator, VetoPolicy};
use crate::domain::foundation::EngineError;
use crate::domain::model::{DecisionProblem, DecisionResult};
use crate::ports::{CacheKey, ResultCache};

/// Per-call overrides of the engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationOptions {
    pub algorithm: Option<String>,
    pub veto_policy: Option<VetoPolicy>,
    pub sensitivity: Option<bool>,
    pub delta: Option<f64>,
}

impl EvaluationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = Some(name.into());
        self
    }

    pub fn with_veto_policy(mut self, policy: VetoPolicy) -> Self {
        self.veto_policy = Some(policy);
        self
    }

    /// Enables sensitivity analysis with the given weight shift.
    pub fn with_sensitivity(mut self, delta: f64) -> Self {
        self.sensitivity = Some(true);
        self.delta = Some(delta);
        self
    }

    pub fn without_sensitivity(mut self) -> Self {
        self.sensitivity = Some(false);
        self
    }
}

/// Service for evaluating decision problems.
pub struct DecisionService {
    registry: AlgorithmRegistry,
    config: EngineConfig,
    cache: Option<Arc<dyn ResultCache>>,
}

impl DecisionService {
    /// Creates a service whose built-in algorithms use the configured defaults.
    pub fn new(config: EngineConfig) -> Self {
        let registry = AlgorithmRegistry::with_parameters(&config.algorithms.to_parameters());
        Self::with_registry(registry, config)
    }

    /// Creates a service over a caller-supplied registry.
    pub fn with_registry(registry: AlgorithmRegistry, config: EngineConfig) -> Self {
        Self {
            registry,
            config,
            cache: None,
        }
    }

    /// Loads and validates configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or validation fails.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = EngineConfig::load()?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Memoizes algorithm results in `cache`.
    pub fn with_cache(mut self, cache: Arc<dyn ResultCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Algorithm to run: the options, then the problem, then the configured default.
    pub fn resolve_algorithm<'a>(
        &'a self,
        problem: &'a DecisionProblem,
        options: &'a EvaluationOptions,
    ) -> &'a str {
        options
            .algorithm
            .as_deref()
            .or_else(|| problem.algorithm().requested())
            .unwrap_or(self.config.algorithms.default_algorithm.as_str())
    }

    /// Ranks `problem`.
    ///
    /// # Algorithm
    ///
    /// 1. Resolve the algorithm
    /// 2. Evaluate vetoes when any criterion carries one
    /// 3. Apply the veto policy (`Exclude` drops rejected alternatives)
    /// 4. Compute the ranking, through the cache when one is attached
    /// 5. Move scores by each alternative's total penalty and re-rank
    /// 6. Attach veto results and their counts
    /// 7. Run sensitivity analysis against the un-penalized ranking
    ///
    /// # Errors
    ///
    /// - `AlgorithmError::Unknown` if the algorithm is not registered
    /// - `ConstraintError` for invalid veto configurations
    /// - `ConstraintError::TooFewSurvivors` if `Exclude` leaves fewer than two
    ///   alternatives; the error lists survivors and rejected alternatives
    /// - Whatever the algorithm or the sensitivity analysis reports
    pub fn evaluate(
        &self,
        problem: &DecisionProblem,
        options: &EvaluationOptions,
    ) -> Result<DecisionResult, EngineError> {
        let name = self.resolve_algorithm(problem, options);
        let span = info_span!(
            "evaluate",
            algorithm = %name,
            alternatives = problem.alternative_count(),
            criteria = problem.criterion_count()
        );
        let _enter = span.enter();

        let algorithm = self.registry.get(name)?;
        let policy = options
            .veto_policy
            .unwrap_or(self.config.constraints.veto_policy);

        let report = if problem.has_vetoes() {
            Some(VetoEvaluator::evaluate(problem)?)
        } else {
            None
        };

        let ranked: Cow<'_, DecisionProblem> = match &report {
            Some(report) => {
                debug!(
                    rejected = report.metadata.rejected,
                    warned = report.metadata.warned,
                    policy = ?policy,
                    "Vetoes evaluated"
                );
                Cow::Owned(VetoEvaluator::apply_policy(problem, report, policy)?)
            }
            None => Cow::Borrowed(problem),
        };

        let baseline = self.compute(name, algorithm.as_ref(), &ranked)?;

        let mut result = match &report {
            Some(report) => VetoEvaluator::penalize_result(baseline.clone(), report)
                .with_veto_results(report.results.clone())
                .with_constraint_metadata(report.metadata),
            None => baseline.clone(),
        };

        let run_sensitivity = options
            .sensitivity
            .unwrap_or(self.config.sensitivity.enabled);
        if run_sensitivity {
            let delta = options.delta.unwrap_or(self.config.sensitivity.delta);
            let sensitivity = SensitivityAnalyzer::analyze_against(
                &ranked,
                algorithm.as_ref(),
                &baseline,
                delta,
                self.config.sensitivity.parallel,
            )?;
            result = result.with_sensitivity(sensitivity);
        }

        debug!(
            top = result.top().map(|item| item.alternative.as_str()),
            "Evaluation complete"
        );
        Ok(result)
    }

    fn compute(
        &self,
        registered_as: &str,
        algorithm: &dyn RankingAlgorithm,
        problem: &DecisionProblem,
    ) -> Result<DecisionResult, EngineError> {
        let Some(cache) = &self.cache else {
            return algorithm.compute(problem);
        };

        let key = CacheKey::new(registered_as, algorithm, problem)?;
        if let Some(hit) = cache.get(&key) {
            debug!(algorithm = registered_as, "Result cache hit");
            return Ok(hit);
        }
        let result = algorithm.compute(problem)?;
        cache.put(key, result.clone());
        Ok(result)
    }
}

impl std::fmt::Debug for DecisionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionService")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
