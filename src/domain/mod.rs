//! Domain layer containing the decision model and the ranking logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (intervals, directions, errors)
//! - `model` - Decision problems, criteria, scoring rules and results
//! - `analysis` - Pure services: scoring, normalization, possibility degrees, sensitivity
//! - `constraints` - Criterion vetoes and veto policies
//! - `algorithms` - Ranking algorithms and their registry

pub mod algorithms;
pub mod analysis;
pub mod constraints;
pub mod foundation;
pub mod model;
