//! Result Cache Adapters

mod in_memory;

pub use in_memory::InMemoryResultCache;
