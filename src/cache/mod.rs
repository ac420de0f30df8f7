//! Cache Module
//!
//! In-memory response cache keyed by the verbatim request path and query.
//! No expiry, no eviction, no size bound.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CachedResponse;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::ResponseCache;
