//! Catalog domain - Model records and their source

mod fetcher;
mod record;

pub use fetcher::CatalogFetcher;
pub use record::{ModelRecord, NOT_AVAILABLE};

#[cfg(test)]
pub use fetcher::MockCatalogFetcher;
