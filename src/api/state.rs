//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::services::CatalogService;

/// Application state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }
}
