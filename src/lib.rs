//! Model Catalog API
//!
//! Scrapes the public Ollama model library, keeps the parsed catalog in a
//! TTL cache and serves it over HTTP with lookups by name, capability and
//! size.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use self::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::DomainError;
use infrastructure::services::CatalogService;

/// Create the application state from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let catalog = CatalogService::from_config(&config.catalog)?;

    Ok(AppState::new(Arc::new(catalog)))
}
