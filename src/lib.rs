//! MCDA Engine - multi-criteria decision analysis
//!
//! This crate ranks alternatives against weighted criteria with a family of
//! MCDA algorithms (WSM, WPM, TOPSIS, VIKOR, ELECTRE I, TODIM and interval
//! variants for uncertain scores), applies per-criterion vetoes, and measures
//! how sensitive a ranking is to the criterion weights.
//!
//! # Example
//!
//! ```
//! use mcda_engine::application::{DecisionService, EvaluationOptions};
//! use mcda_engine::config::EngineConfig;
//! use mcda_engine::domain::model::{Criterion, DecisionProblem};
//!
//! let problem = DecisionProblem::builder()
//!     .alternatives(vec!["A1", "A2", "A3"])
//!     .criterion(Criterion::benefit("c1", 0.33).unwrap())
//!     .criterion(Criterion::benefit("c2", 0.33).unwrap())
//!     .criterion(Criterion::benefit("c3", 0.34).unwrap())
//!     .row("A1", &[10.0, 8.0, 7.0])
//!     .row("A2", &[9.0, 6.0, 8.0])
//!     .row("A3", &[8.0, 7.0, 9.0])
//!     .algorithm("wsm")
//!     .build()
//!     .unwrap();
//!
//! let service = DecisionService::new(EngineConfig::default());
//! let result = service.evaluate(&problem, &EvaluationOptions::default()).unwrap();
//! assert_eq!(result.top().unwrap().alternative, "A1");
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
