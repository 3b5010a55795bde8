//! Result Renderer Adapters

mod json;

pub use json::JsonResultRenderer;
