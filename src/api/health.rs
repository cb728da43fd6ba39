//! Health check endpoints for Kubernetes probes

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::state::AppState;

/// Service status, with per-component checks on readiness
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<ComponentCheck>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Serialize)]
pub struct ComponentCheck {
    pub name: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl HealthResponse {
    fn new(status: HealthStatus, checks: Vec<ComponentCheck>) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks,
        }
    }
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(HealthStatus::Healthy, Vec::new()))
}

/// GET /ready
///
/// Never fetches: an empty cache is reported as degraded, and requests are
/// still accepted because the first query fills it.
pub async fn ready_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let catalog = catalog_cache_check(&state).await;

    Json(HealthResponse::new(catalog.status, vec![catalog]))
}

/// GET /live
pub async fn live_check() -> StatusCode {
    StatusCode::OK
}

async fn catalog_cache_check(state: &AppState) -> ComponentCheck {
    let cached = state.catalog.is_cached().await;

    ComponentCheck {
        name: "catalog_cache",
        status: if cached {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        message: (!cached).then_some("Catalog not cached; next query will fetch"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Degraded).unwrap(),
            "\"degraded\""
        );
    }

    #[test]
    fn test_health_response_omits_empty_checks() {
        let json = serde_json::to_value(HealthResponse::new(HealthStatus::Healthy, Vec::new())).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json.get("checks").is_none());
    }

    #[test]
    fn test_degraded_check_carries_message() {
        let check = ComponentCheck {
            name: "catalog_cache",
            status: HealthStatus::Degraded,
            message: Some("Catalog not cached; next query will fetch"),
        };
        let json = serde_json::to_value(HealthResponse::new(check.status, vec![check])).unwrap();

        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"][0]["name"], "catalog_cache");
        assert!(json["checks"][0]["message"].is_string());
    }
}
