//! OMDb Cache Proxy - A caching pass-through for the OMDb movie API
//!
//! Forwards `GET /` requests upstream with a server-side API key and keeps
//! every successful response in memory, keyed by the verbatim path + query.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod upstream;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::ProxyError;
