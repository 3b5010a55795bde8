//! Error types for the decision engine.

use std::fmt;
use thiserror::Error;

/// Errors raised while constructing or validating model values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid value {actual}: {reason}")]
    InvalidValue {
        field: String,
        actual: f64,
        reason: String,
    },

    #[error("Duplicate {field} '{value}'")]
    Duplicate { field: String, value: String },

    #[error("Invalid interval: lower bound {lower} exceeds upper bound {upper}")]
    InvalidInterval { lower: f64, upper: f64 },

    #[error("Alternative '{alternative}' has no score for criterion '{criterion}'")]
    MissingScore {
        alternative: String,
        criterion: String,
    },

    #[error("Scores reference unknown alternative '{0}'")]
    UnknownAlternative(String),

    #[error("At least {required} alternatives are required, got {actual}")]
    InsufficientAlternatives { required: usize, actual: usize },

    #[error("At least one criterion is required")]
    NoCriteria,

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an invalid value validation error.
    pub fn invalid_value(field: impl Into<String>, actual: f64, reason: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            actual,
            reason: reason.into(),
        }
    }

    /// Creates a duplicate identifier error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        ValidationError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a missing score error.
    pub fn missing_score(alternative: impl Into<String>, criterion: impl Into<String>) -> Self {
        ValidationError::MissingScore {
            alternative: alternative.into(),
            criterion: criterion.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning raw measurements into scores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("Criterion '{criterion}': alternative '{alternative}' has no raw field '{field}'")]
    MissingField {
        criterion: String,
        alternative: String,
        field: String,
    },

    #[error("Criterion '{criterion}': alternative '{alternative}' has non-finite raw value")]
    NonFinite {
        criterion: String,
        alternative: String,
    },
}

/// Errors raised when an algorithm's numeric preconditions do not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlgorithmError {
    #[error("Unknown algorithm '{0}'")]
    Unknown(String),

    #[error("{algorithm}: alternative '{alternative}' has non-positive value {value} on '{criterion}'")]
    NonPositiveValue {
        algorithm: String,
        alternative: String,
        criterion: String,
        value: f64,
    },

    #[error("{algorithm}: parameter '{parameter}' = {value} is invalid: {reason}")]
    InvalidParameter {
        algorithm: String,
        parameter: String,
        value: f64,
        reason: String,
    },
}

impl AlgorithmError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(
        algorithm: impl Into<String>,
        parameter: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        AlgorithmError::InvalidParameter {
            algorithm: algorithm.into(),
            parameter: parameter.into(),
            value,
            reason: reason.into(),
        }
    }
}

/// Errors raised for malformed veto configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    #[error("Tiered veto has no tiers")]
    EmptyTiers,

    #[error("Composite veto has no conditions")]
    EmptyConditions,

    #[error("Penalty score must be finite and non-negative, got {0}")]
    InvalidPenalty(f64),

    #[error("Tier bounds are inverted: min {min} is not below max {max}")]
    InvertedTier { min: f64, max: f64 },

    #[error("Veto on '{criterion}' references unknown criterion '{referenced}'")]
    UnknownCriterion {
        criterion: String,
        referenced: String,
    },

    #[error("Soft veto cannot use action '{0}'; expected 'warning' or 'penalty'")]
    InvalidSoftAction(String),

    #[error("Vetoes rejected {} alternatives and left {} to rank; at least 2 are required", .rejected.len(), .survivors.len())]
    TooFewSurvivors {
        survivors: Vec<String>,
        rejected: Vec<String>,
    },
}

/// Errors raised by problem loaders.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to load {format} problem: {reason}")]
pub struct LoadError {
    pub format: String,
    pub reason: String,
}

impl LoadError {
    /// Creates a new load error.
    pub fn new(format: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    ScoringFailed,
    AlgorithmFailed,
    ConstraintInvalid,
    LoadFailed,
    RenderFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ScoringFailed => "SCORING_FAILED",
            ErrorCode::AlgorithmFailed => "ALGORITHM_FAILED",
            ErrorCode::ConstraintInvalid => "CONSTRAINT_INVALID",
            ErrorCode::LoadFailed => "LOAD_FAILED",
            ErrorCode::RenderFailed => "RENDER_FAILED",
        };
        write!(f, "{}", s)
    }
}

/// Top-level engine error unifying every failure kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Failed to render result: {0}")]
    Render(String),
}

impl EngineError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EngineError::Validation(_) => ErrorCode::ValidationFailed,
            EngineError::Scoring(_) => ErrorCode::ScoringFailed,
            EngineError::Algorithm(_) => ErrorCode::AlgorithmFailed,
            EngineError::Constraint(_) => ErrorCode::ConstraintInvalid,
            EngineError::Load(_) => ErrorCode::LoadFailed,
            EngineError::Render(_) => ErrorCode::RenderFailed,
        }
    }
}
