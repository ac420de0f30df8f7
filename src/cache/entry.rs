//! Cache Entry Module
//!
//! Defines the payload stored for each cache key.

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};

// == Cached Response ==
/// An upstream response body as it is stored and replayed.
///
/// The body is opaque; it is never parsed or re-encoded.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Raw upstream body
    pub body: Bytes,
    /// Upstream `Content-Type`, if it sent one
    pub content_type: Option<String>,
    /// When the body was fetched from upstream
    pub fetched_at: DateTime<Utc>,
}

impl CachedResponse {
    // == Constructor ==
    /// Creates a new cached response stamped with the current time.
    pub fn new(body: impl Into<Bytes>, content_type: Option<String>) -> Self {
        Self {
            body: body.into(),
            content_type,
            fetched_at: Utc::now(),
        }
    }

    // == Age ==
    /// Milliseconds since the body was fetched. Informational only.
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_milliseconds().max(0)
    }

    /// Body size in bytes.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// True when upstream sent an empty body.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

// Always 200: upstream status is not passed through.
impl IntoResponse for CachedResponse {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .as_deref()
            .and_then(|ct| HeaderValue::from_str(ct).ok());

        let mut response = (StatusCode::OK, self.body).into_response();
        if let Some(ct) = content_type {
            response.headers_mut().insert(header::CONTENT_TYPE, ct);
        }
        response
    }
}
