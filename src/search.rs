use crate::config::Config;
use crate::errors::AppError;
use crate::models::{SearchItem, SearchResponse};
use reqwest::Client;

/// External web-search seam.
///
/// A call either returns the provider's result list (possibly empty) or a
/// terminal error; no timeout or retry policy is layered on top, and the
/// pipeline treats any failure as fatal to the remaining job.
pub trait SearchProvider {
    fn search(
        &self,
        company: &str,
        country: &str,
    ) -> impl std::future::Future<Output = Result<Vec<SearchItem>, AppError>> + Send;
}

/// Client for the external custom-search API.
pub struct SearchService {
    client: Client,
    base_url: String,
    api_key: String,
    engine_id: String,
}

impl SearchService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.search_base_url.clone(),
            api_key: config.search_api_key.clone(),
            engine_id: config.search_engine_id.clone(),
        }
    }
}

impl SearchProvider for SearchService {
    /// Searches for `"{company} {country}"` and returns the provider's items
    /// in the order returned.
    async fn search(&self, company: &str, country: &str) -> Result<Vec<SearchItem>, AppError> {
        let query = format!("{} {}", company, country);

        // Build URL with proper parameter encoding to prevent injection attacks
        let url = reqwest::Url::parse_with_params(
            &self.base_url,
            &[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query.as_str()),
            ],
        )
        .map_err(|e| AppError::Search(format!("Failed to build URL: {}", e)))?;

        tracing::info!("Searching for: {}", query);
        // Redact key from logs to prevent credential exposure
        tracing::debug!("Search URL: {}?key=[REDACTED]&cx={}&q={}", self.base_url, self.engine_id, query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Search request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Search API returned error {}: {}", status, error_text);
            return Err(AppError::Search(format!(
                "Search API returned status {}: {}",
                status, error_text
            )));
        }

        let result: SearchResponse = response.json().await.map_err(|e| {
            AppError::Search(format!("Failed to parse search response: {}", e))
        })?;

        for (i, item) in result.items.iter().enumerate() {
            tracing::debug!("#{}: {} - {}", i + 1, item.title, item.link);
        }

        Ok(result.items)
    }
}
