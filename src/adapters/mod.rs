//! Adapters - Implementations of port interfaces.
//!
//! - `loaders` - JSON and YAML problem loaders plus a format registry
//! - `renderers` - JSON result rendering
//! - `cache` - In-memory result cache

pub mod cache;
pub mod loaders;
pub mod renderers;

pub use cache::InMemoryResultCache;
pub use loaders::{JsonProblemLoader, LoaderRegistry, YamlProblemLoader};
pub use renderers::JsonResultRenderer;
