//! Catalog service - Cached model catalog and its queries

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::domain::{CacheInfo, CatalogFetcher, DomainError, ModelRecord};
use crate::infrastructure::cache::{InMemoryCache, InMemoryCacheConfig};
use crate::infrastructure::catalog::{CatalogConfig, HttpCatalogFetcher, ModelExtractor};
use crate::infrastructure::observability::record_catalog_size;

/// Cache key holding the full catalog snapshot
pub const MODELS_CACHE_KEY: &str = "models";

/// Shared, read-only snapshot of the catalog
pub type ModelSnapshot = Arc<Vec<ModelRecord>>;

/// Fetches, extracts and caches the model catalog, and answers queries over it.
///
/// Every query reads the same cached snapshot, so a stale snapshot is
/// refreshed transparently by whichever query arrives first.
pub struct CatalogService {
    fetcher: Arc<dyn CatalogFetcher>,
    extractor: Arc<ModelExtractor>,
    cache: InMemoryCache<ModelSnapshot>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("extractor", &self.extractor)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CatalogService {
    /// Create a new CatalogService from its parts
    pub fn new(
        fetcher: Arc<dyn CatalogFetcher>,
        extractor: ModelExtractor,
        cache: InMemoryCache<ModelSnapshot>,
    ) -> Self {
        Self {
            fetcher,
            extractor: Arc::new(extractor),
            cache,
        }
    }

    /// Build the service backed by the HTTP fetcher described in `config`
    pub fn from_config(config: &CatalogConfig) -> Result<Self, DomainError> {
        let fetcher = HttpCatalogFetcher::new(
            config.source_url.clone(),
            config.fetch_timeout()?,
            &config.user_agent,
        )?;
        let extractor = ModelExtractor::new(&config.selectors)?;
        let cache = InMemoryCache::new(InMemoryCacheConfig::default().with_ttl(config.cache_ttl()?))?;

        info!(
            source_url = %config.source_url,
            cache_ttl_hours = config.cache_ttl_hours,
            "Catalog service configured"
        );

        Ok(Self::new(Arc::new(fetcher), extractor, cache))
    }

    /// All models in page order, fetching the page if the snapshot is stale
    pub async fn get_models(&self) -> Result<ModelSnapshot, DomainError> {
        let fetcher = Arc::clone(&self.fetcher);
        let extractor = Arc::clone(&self.extractor);

        self.cache
            .get(MODELS_CACHE_KEY, move || async move {
                let html = fetcher.fetch().await?;
                let models = extractor.extract_all(&html);

                info!(models = models.len(), "Extracted catalog models");
                record_catalog_size(models.len());

                Ok(Arc::new(models))
            })
            .await
    }

    /// All models as ordered field mappings
    pub async fn get_models_json(&self) -> Result<Vec<Map<String, Value>>, DomainError> {
        let models = self.get_models().await?;
        Ok(models.iter().map(ModelRecord::to_map).collect())
    }

    /// First model whose title matches `name`, ignoring case
    pub async fn get_model_by_name(&self, name: &str) -> Result<Option<ModelRecord>, DomainError> {
        debug!(name = %name, "Looking up model by name");

        let models = self.get_models().await?;
        Ok(models.iter().find(|m| m.has_title(name)).cloned())
    }

    /// Models listing `capability`, ignoring case, in page order
    pub async fn get_models_by_capability(
        &self,
        capability: &str,
    ) -> Result<Vec<ModelRecord>, DomainError> {
        debug!(capability = %capability, "Filtering models by capability");

        let models = self.get_models().await?;
        Ok(models
            .iter()
            .filter(|m| m.has_capability(capability))
            .cloned()
            .collect())
    }

    /// Models offered in `size`, ignoring case, in page order
    pub async fn get_models_by_size(&self, size: &str) -> Result<Vec<ModelRecord>, DomainError> {
        debug!(size = %size, "Filtering models by size");

        let models = self.get_models().await?;
        Ok(models.iter().filter(|m| m.has_size(size)).cloned().collect())
    }

    /// Freshness of the catalog snapshot
    pub async fn get_cache_status(&self) -> CacheInfo {
        self.cache.get_cache_info(MODELS_CACHE_KEY).await
    }

    /// Whether a fresh snapshot is available without fetching
    pub async fn is_cached(&self) -> bool {
        self.cache.is_cached(MODELS_CACHE_KEY).await
    }

    /// Drop the snapshot so the next query fetches the page again
    pub async fn invalidate(&self) {
        info!("Invalidating catalog snapshot");
        self.cache.invalidate(Some(MODELS_CACHE_KEY)).await;
    }
}
