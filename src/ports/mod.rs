//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProblemLoader` - Parses decision problems from documents
//! - `ResultRenderer` - Serializes ranking results
//! - `ResultCache` - Memoizes results per algorithm and problem

mod problem_loader;
mod result_cache;
mod result_renderer;

pub use problem_loader::ProblemLoader;
pub use result_cache::{CacheKey, ResultCache};
pub use result_renderer::ResultRenderer;
