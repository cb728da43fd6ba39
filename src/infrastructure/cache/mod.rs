//! Cache infrastructure - Cache implementations

mod in_memory;

pub use in_memory::{InMemoryCache, InMemoryCacheConfig, DEFAULT_TTL};
