//! Catalog endpoint handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, CapabilityQuery, NameQuery, SizeQuery};
use crate::domain::{CacheInfo, DomainError, ModelRecord};

/// Banner served at the root path
pub const ROOT_BANNER: &str = "API for fetching Ollama Models!";

fn required<T>(query: Result<Query<T>, QueryRejection>, param: &str) -> Result<T, ApiError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| DomainError::validation(param, rejection.body_text()).into())
}

/// GET /
pub async fn root() -> Json<&'static str> {
    Json(ROOT_BANNER)
}

/// GET /get_models
pub async fn get_models(State(state): State<AppState>) -> Result<Json<Vec<ModelRecord>>, ApiError> {
    debug!("Listing all models");

    let models = state.catalog.get_models().await?;
    Ok(Json(models.to_vec()))
}

/// GET /get_models_json
pub async fn get_models_json(
    State(state): State<AppState>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    let models = state.catalog.get_models_json().await?;
    Ok(Json(models))
}

/// GET /get_model_by_name?name=
///
/// An unknown name yields `null` rather than an error.
pub async fn get_model_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Option<ModelRecord>>, ApiError> {
    let NameQuery { name } = required(query, "name")?;

    let model = state.catalog.get_model_by_name(&name).await?;
    Ok(Json(model))
}

/// GET /get_model_by_capability?capability=
pub async fn get_models_by_capability(
    State(state): State<AppState>,
    query: Result<Query<CapabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<ModelRecord>>, ApiError> {
    let CapabilityQuery { capability } = required(query, "capability")?;

    let models = state.catalog.get_models_by_capability(&capability).await?;
    Ok(Json(models))
}

/// GET /get_models_size?size=
pub async fn get_models_by_size(
    State(state): State<AppState>,
    query: Result<Query<SizeQuery>, QueryRejection>,
) -> Result<Json<Vec<ModelRecord>>, ApiError> {
    let SizeQuery { size } = required(query, "size")?;

    let models = state.catalog.get_models_by_size(&size).await?;
    Ok(Json(models))
}

/// GET /cache_status
pub async fn cache_status(State(state): State<AppState>) -> Json<CacheInfo> {
    Json(state.catalog.get_cache_status().await)
}

/// POST /cache/invalidate
pub async fn invalidate_cache(State(state): State<AppState>) -> Json<CacheInfo> {
    state.catalog.invalidate().await;
    Json(state.catalog.get_cache_status().await)
}
