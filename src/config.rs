//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::error::{ProxyError, Result};

/// Default upstream base URL (the public OMDb endpoint)
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://www.omdbapi.com";

/// Default HTTP listen port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Proxy configuration parameters.
///
/// Everything except the API key has a default.
#[derive(Clone)]
pub struct Config {
    /// Credential appended to every upstream request as `apikey`
    pub api_key: String,
    /// Base URL the cache key is appended to
    pub upstream_base_url: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_KEY` - Upstream credential (required)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - Upstream base URL (default: http://www.omdbapi.com)
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ProxyError::Config("API_KEY must be set".to_string()))?;

        Ok(Self {
            api_key,
            upstream_base_url: lookup("UPSTREAM_BASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        })
    }
}

/// Loads `KEY=value` pairs from a `.env` file (current directory or a parent)
/// into the process environment. Variables already set are left alone.
///
/// Returns the path of the file that was read, if one was found.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

// The key must never end up in logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("upstream_base_url", &self.upstream_base_url)
            .field("server_port", &self.server_port)
            .finish()
    }
}
