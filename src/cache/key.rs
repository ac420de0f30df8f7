//! Cache Key Module
//!
//! Keys are the incoming request's path and query string, taken verbatim.

use std::fmt;

use axum::http::Uri;

// == Cache Key ==
/// Verbatim path + query of an incoming request (e.g. `/?t=batman`).
///
/// No normalization happens: parameter order and letter case both
/// distinguish keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Builds a key from a request URI, ignoring scheme and authority.
    pub fn from_uri(uri: &Uri) -> Self {
        let raw = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Self(raw.to_string())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the key carries a query string (even an empty one).
    pub fn has_query(&self) -> bool {
        self.0.contains('?')
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
