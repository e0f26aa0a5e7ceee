//! HTTP client for the storefront's article detail endpoint.

mod endpoint;

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::document::product_document;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

pub use endpoint::CatalogParams;

/// Fetches raw product detail documents from `evaluate.article.v1`.
///
/// 429, 5xx and network failures are retried with exponential backoff up to
/// `max_retries` additional attempts. Every other failure is returned at once.
pub struct CatalogClient {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl CatalogClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the detail document (`result.<product_id>`) for one product.
    ///
    /// `product_id` must already be normalized, see
    /// [`normalize_product_id`](crate::normalize_product_id).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` cannot be parsed.
    /// - [`ScraperError::RateLimited`] on HTTP 429 after retries are exhausted.
    /// - [`ScraperError::NotFound`] on HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure after retries.
    /// - [`ScraperError::Deserialize`] if the body is not JSON (not retried).
    /// - [`ScraperError::MissingProduct`] if the response has no entry for the product.
    pub async fn fetch_product_document(
        &self,
        base_url: &str,
        product_id: &str,
        params: &CatalogParams,
    ) -> Result<Value, ScraperError> {
        let url = endpoint::product_url(base_url, product_id, params)?;
        let domain = url.host_str().unwrap_or_default().to_owned();
        let referer = base_url.to_owned();

        let response = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let domain = domain.clone();
            let referer = referer.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "*/*")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "es-ES,es;q=0.9,en;q=0.5")
                    .header(reqwest::header::REFERER, &referer)
                    .header("X-Requested-With", "XMLHttpRequest")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(0);
                    return Err(ScraperError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Value>(&body).map_err(|source| ScraperError::Deserialize {
                    context: format!("detail response for {product_id}"),
                    source,
                })
            }
        })
        .await?;

        tracing::debug!(product_id, "detail response received");
        product_document(response, product_id)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
