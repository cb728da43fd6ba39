//! Catalog source configuration

use std::time::Duration;

use serde::Deserialize;

use super::extractor::SelectorConfig;
use crate::domain::DomainError;

/// Where the catalog comes from and how long a fetched copy stays fresh
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Library page URL
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Cache time-to-live in hours
    #[serde(default = "default_cache_ttl_hours")]
    pub cache_ttl_hours: f64,
    /// Upper bound for a single fetch
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// User-Agent header sent with every fetch
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

fn default_source_url() -> String {
    "https://ollama.com/library".to_string()
}

fn default_cache_ttl_hours() -> f64 {
    12.0
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("model-catalog-api/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            cache_ttl_hours: default_cache_ttl_hours(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            user_agent: default_user_agent(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Cache TTL as a duration; rejects non-positive or non-finite hours
    pub fn cache_ttl(&self) -> Result<Duration, DomainError> {
        if !(self.cache_ttl_hours.is_finite() && self.cache_ttl_hours > 0.0) {
            return Err(DomainError::configuration(format!(
                "cache_ttl_hours must be a positive number, got {}",
                self.cache_ttl_hours
            )));
        }

        Duration::try_from_secs_f64(self.cache_ttl_hours * 3600.0).map_err(|e| {
            DomainError::configuration(format!("cache_ttl_hours is out of range: {}", e))
        })
    }

    /// Fetch timeout as a duration; zero is rejected
    pub fn fetch_timeout(&self) -> Result<Duration, DomainError> {
        if self.fetch_timeout_secs == 0 {
            return Err(DomainError::configuration(
                "fetch_timeout_secs must be greater than zero",
            ));
        }

        Ok(Duration::from_secs(self.fetch_timeout_secs))
    }
}
