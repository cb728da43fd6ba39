//! Catalog source fetcher trait

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Retrieves the raw markup of the catalog page.
///
/// Implementations perform exactly one request per call and never retry;
/// failures surface as [`DomainError::Fetch`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetches the full document body as text
    async fn fetch(&self) -> Result<String, DomainError>;
}
