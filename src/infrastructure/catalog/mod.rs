//! Catalog infrastructure - Source fetching and markup extraction

mod config;
mod extractor;
mod http_fetcher;

pub use self::config::CatalogConfig;
pub use extractor::{ModelExtractor, SelectorConfig};
pub use http_fetcher::HttpCatalogFetcher;

#[cfg(test)]
pub(crate) use extractor::fixtures;
