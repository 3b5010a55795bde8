//! Problem Loader Adapters
//!
//! ## Available Adapters
//!
//! - **JsonProblemLoader** - Parses JSON documents
//! - **YamlProblemLoader** - Parses YAML documents
//! - **LoaderRegistry** - Dispatches on format name or file extension

mod json;
mod registry;
mod yaml;

pub use json::JsonProblemLoader;
pub use registry::LoaderRegistry;
pub use yaml::YamlProblemLoader;
