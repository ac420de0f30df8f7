//! API Routes
//!
//! Configures the Axum router with the single proxy endpoint.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{proxy_handler, AppState};

/// Creates the router.
///
/// # Endpoints
/// - `GET /` - Proxy to the upstream API (any query string)
///
/// # Middleware
/// - Tracing: Logs every request and response
///
/// No CORS headers are sent: browsers on other origins must not be able to
/// spend the server-side API key.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(proxy_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
