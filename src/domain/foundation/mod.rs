//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary
//! of the decision engine.

mod direction;
mod errors;
mod interval;

pub use direction::Direction;
pub use errors::{
    AlgorithmError, ConstraintError, EngineError, ErrorCode, LoadError, ScoringError,
    ValidationError,
};
pub use interval::Interval;
