use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::{CatalogFetcher, DomainError};
use crate::infrastructure::observability::record_fetch;

/// Catalog fetcher using reqwest
#[derive(Debug, Clone)]
pub struct HttpCatalogFetcher {
    client: reqwest::Client,
    source_url: String,
    timeout: Duration,
}

impl HttpCatalogFetcher {
    pub fn new(
        source_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            source_url: source_url.into(),
            timeout,
        })
    }

    fn request_error(&self, err: reqwest::Error) -> DomainError {
        if err.is_timeout() {
            DomainError::fetch(
                &self.source_url,
                format!("Request timed out after {}s", self.timeout.as_secs_f64()),
            )
        } else {
            DomainError::fetch(&self.source_url, format!("Request failed: {}", err))
        }
    }

    async fn fetch_body(&self) -> Result<String, DomainError> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();

        if !status.is_success() {
            return Err(DomainError::fetch(
                &self.source_url,
                format!("HTTP {}", status),
            ));
        }

        response.text().await.map_err(|e| self.request_error(e))
    }
}

#[async_trait]
impl CatalogFetcher for HttpCatalogFetcher {
    async fn fetch(&self) -> Result<String, DomainError> {
        let start = Instant::now();
        let result = self.fetch_body().await;
        let duration = start.elapsed();

        record_fetch(result.is_ok(), duration);

        match &result {
            Ok(body) => info!(
                source_url = %self.source_url,
                bytes = body.len(),
                duration_ms = %duration.as_millis(),
                "Fetched catalog source"
            ),
            Err(e) => warn!(
                source_url = %self.source_url,
                duration_ms = %duration.as_millis(),
                error = %e,
                "Catalog fetch failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(server: &MockServer, timeout: Duration) -> HttpCatalogFetcher {
        HttpCatalogFetcher::new(
            format!("{}/library", server.uri()),
            timeout,
            "model-catalog-api/test",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .and(header("user-agent", "model-catalog-api/test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<ul id=\"repo\"></ul>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server, Duration::from_secs(5));
        let body = fetcher.fetch().await.unwrap();

        assert_eq!(body, "<ul id=\"repo\"></ul>");
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server, Duration::from_secs(5));
        let err = fetcher.fetch().await.unwrap_err();

        match err {
            DomainError::Fetch { source_url, message } => {
                assert_eq!(source_url, fetcher.source_url);
                assert!(message.contains("503"));
            }
            other => panic!("Expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server, Duration::from_millis(100));
        let err = fetcher.fetch().await.unwrap_err();

        assert!(err.is_fetch());
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpCatalogFetcher::new(
            "http://127.0.0.1:1/library",
            Duration::from_secs(2),
            "model-catalog-api/test",
        )
        .unwrap();

        let err = fetcher.fetch().await.unwrap_err();

        assert!(err.is_fetch());
    }
}
