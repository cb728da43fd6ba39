//! Domain layer - Core entities, errors and abstractions

pub mod cache;
pub mod catalog;
pub mod error;

pub use cache::{CacheInfo, Clock, SystemClock};
pub use catalog::{CatalogFetcher, ModelRecord, NOT_AVAILABLE};
pub use error::DomainError;
