//! API Handlers
//!
//! The proxy handler: cache lookup, upstream fetch on miss, cache populate.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::extract::{OriginalUri, State};
use tracing::{debug, info};

use crate::cache::{CacheKey, CachedResponse, ResponseCache};
use crate::config::Config;
use crate::error::Result;
use crate::upstream::OmdbClient;

/// Application state shared across all handlers.
///
/// The cache lives as long as the state does, which in the binary is the
/// whole process.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
    /// Upstream API client
    pub upstream: OmdbClient,
}

impl AppState {
    /// Creates a new AppState around an existing cache.
    pub fn new(cache: ResponseCache, upstream: OmdbClient) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            upstream,
        }
    }

    /// Creates a new AppState with an empty cache from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(ResponseCache::new(), OmdbClient::from_config(config))
    }
}

/// Handler for GET /
///
/// Answers from the cache when the exact path + query was seen before;
/// otherwise fetches upstream, stores 2xx bodies and relays the body with
/// status 200. The lock is never held across the upstream call, so two
/// concurrent misses on one key both fetch and the later write wins.
pub async fn proxy_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<CachedResponse> {
    let key = CacheKey::from_uri(&uri);

    // Acquire write lock (lookups update stats)
    let cached = state.cache.write().await.get(&key);
    if let Some(entry) = cached {
        debug!(key = %key, age_ms = entry.age_ms(), "Cache hit");
        return Ok(entry);
    }
    debug!(key = %key, "Cache miss");

    let fetched = state.upstream.fetch(&key).await?;

    if fetched.is_cacheable() {
        let mut cache = state.cache.write().await;
        let replaced = cache.insert(key.clone(), fetched.payload.clone());
        let stats = cache.stats();
        info!(
            key = %key,
            bytes = fetched.payload.len(),
            replaced,
            entries = stats.total_entries,
            hit_rate = stats.hit_rate(),
            "Cached upstream response"
        );
    } else {
        debug!(key = %key, status = %fetched.status, "Relaying uncached upstream response");
    }

    Ok(fetched.payload)
}
