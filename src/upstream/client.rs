//! OMDb Client
//!
//! Issues the upstream GET for a cache key with the API key appended.

use axum::http::{header, StatusCode};
use reqwest::Client;
use tracing::{info, warn};

use crate::cache::{CacheKey, CachedResponse};
use crate::config::Config;
use crate::error::Result;

// == Upstream Response ==
/// What came back from upstream: its real status plus the payload to relay.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Status upstream answered with
    pub status: StatusCode,
    /// Body and content type, ready to cache or relay
    pub payload: CachedResponse,
}

impl UpstreamResponse {
    /// Only 2xx responses are worth caching.
    pub fn is_cacheable(&self) -> bool {
        self.status.is_success()
    }
}

// == OMDb Client ==
/// Thin HTTP client for the upstream movie API.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    // == Constructor ==
    /// Creates a client for `base_url`; a trailing `/` is dropped.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.upstream_base_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Request URL ==
    /// Base URL + key verbatim + `apikey` parameter.
    ///
    /// A key without a query string gets `?` as the separator, otherwise `&`.
    pub fn request_url(&self, key: &CacheKey) -> String {
        let separator = if key.has_query() { '&' } else { '?' };
        format!(
            "{}{}{}apikey={}",
            self.base_url,
            key.as_str(),
            separator,
            self.api_key
        )
    }

    // == Fetch ==
    /// Performs the upstream GET and reads the whole body.
    ///
    /// Non-2xx statuses are returned, not raised; only transport and body
    /// read failures become errors.
    pub async fn fetch(&self, key: &CacheKey) -> Result<UpstreamResponse> {
        info!(key = %key, "Fetching from upstream");

        let response = self
            .client
            .get(self.request_url(key))
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which carries the key
                let e = e.without_url();
                warn!(key = %key, error = %e, "Upstream request failed");
                e
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| e.without_url())?;

        if !status.is_success() {
            warn!(key = %key, status = %status, "Upstream returned non-success status");
        }

        Ok(UpstreamResponse {
            status,
            payload: CachedResponse::new(body, content_type),
        })
    }
}

// The key must never end up in logs.
impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
