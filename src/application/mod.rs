//! Application layer - orchestrates domain services behind the ports.

mod decision_service;

pub use decision_service::{DecisionService, EvaluationOptions};
