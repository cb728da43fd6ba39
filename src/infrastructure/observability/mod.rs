//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use self::config::MetricsConfig;
pub use self::metrics::{
    create_metrics_router, init_metrics, record_catalog_size, record_fetch, record_http_request,
    PrometheusMetrics,
};
