//! API Module
//!
//! HTTP handler and routing for the proxy.
//!
//! # Endpoints
//! - `GET /` - Cached pass-through to the upstream movie API

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
