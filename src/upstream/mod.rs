//! Upstream Module
//!
//! HTTP client for the third-party movie API the proxy fronts.

mod client;

pub use client::{OmdbClient, UpstreamResponse};
