//! Infrastructure services

mod catalog_service;

pub use catalog_service::{CatalogService, ModelSnapshot, MODELS_CACHE_KEY};

#[cfg(test)]
pub(crate) use catalog_service::test_support;
