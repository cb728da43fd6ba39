use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::catalog;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware};
use super::state::AppState;
use super::types::ApiError;

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::root))
        // Catalog queries
        .route("/get_models", get(catalog::get_models))
        .route("/get_models_json", get(catalog::get_models_json))
        .route("/get_model_by_name", get(catalog::get_model_by_name))
        .route("/get_model_by_capability", get(catalog::get_models_by_capability))
        .route("/get_models_size", get(catalog::get_models_by_size))
        // Cache management
        .route("/cache_status", get(catalog::cache_status))
        .route("/cache/invalidate", post(catalog::invalidate_cache))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
