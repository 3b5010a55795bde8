//! Constraints Module - criterion vetoes and their evaluation.
//!
//! A veto marks the acceptable region of a criterion score. Alternatives
//! outside it are rejected, warned or penalized depending on the veto kind
//! (`hard`, `soft`, `tiered`, `composite`). The caller's [`VetoPolicy`]
//! decides whether rejected alternatives are excluded before ranking or kept
//! with penalized scores.

mod evaluator;
mod veto;

pub use evaluator::{VetoEvaluator, VetoReport};
pub use veto::{
    ComparisonOperator, ConstraintMetadata, VetoAction, VetoCondition, VetoConfig, VetoLogic,
    VetoPolicy, VetoResult, VetoTier,
};
