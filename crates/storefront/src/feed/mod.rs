//! Third-party catalog feed client.
//!
//! A thin `reqwest` client over the feed's REST surface. Fetches are never
//! retried; a failed fetch surfaces as a [`FeedError`] and the request that
//! triggered it fails.

mod types;

pub use types::{FeedCategoryResponse, FeedProduct};

use std::sync::Arc;

use thiserror::Error;
use url::Url;

/// Errors from the catalog feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed rate-limited us; retry after the given seconds.
    #[error("feed rate limited, retry after {0}s")]
    RateLimited(u64),

    /// The feed returned a non-success status.
    #[error("feed returned HTTP {status}")]
    Status { status: reqwest::StatusCode },

    /// The category slug does not form a valid request URL.
    #[error("invalid feed path: {0}")]
    InvalidPath(String),

    /// The feed body did not parse as the expected JSON shape.
    #[error("feed response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the third-party catalog feed.
#[derive(Clone)]
pub struct FeedClient {
    inner: Arc<FeedClientInner>,
}

struct FeedClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl FeedClient {
    /// Create a new feed client.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(FeedClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Fetch every product the feed lists under one of its category slugs.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on transport failure, non-success status, rate
    /// limiting, or an unparseable body. Nothing is retried.
    pub async fn products_in_category(
        &self,
        product_type: &str,
    ) -> Result<Vec<FeedProduct>, FeedError> {
        let url = self
            .inner
            .base_url
            .join(&format!("products/category/{product_type}"))
            .map_err(|_| FeedError::InvalidPath(product_type.to_owned()))?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(FeedError::RateLimited(retry_after));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Feed returned non-success status"
            );
            return Err(FeedError::Status { status });
        }

        let parsed: FeedCategoryResponse = serde_json::from_str(&body).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse feed response"
            );
        })?;

        Ok(parsed.products)
    }
}
