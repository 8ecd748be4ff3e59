//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EAZIKA_SERVER_URL` - API server origin (default: `https://server.eazika.com`)
//! - `EAZIKA_REQUEST_TIMEOUT_SECS` - Per-request deadline in seconds (default: 15)
//! - `EAZIKA_DEBUG_IDENTITY_FALLBACK` - Substitute a stub identity when the
//!   identity fetch fails (`true`/`1`). Development aid only; off by default.

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default API server origin.
pub const DEFAULT_SERVER_URL: &str = "https://server.eazika.com";

/// Default per-request deadline at the transport layer.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Eazika client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API server origin, without the `/api/v2` prefix.
    pub server_url: Url,
    /// Fixed per-request deadline applied by the transport.
    pub request_timeout: Duration,
    /// When set, a failed identity fetch substitutes a deterministic stub
    /// user instead of surfacing the error. Development aid only.
    pub debug_identity_fallback: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but cannot
    /// be parsed (malformed URL, non-numeric timeout).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if it doesn't)
        let _ = dotenvy::dotenv();

        let server_url = match std::env::var("EAZIKA_SERVER_URL") {
            Ok(raw) => parse_server_url(&raw)?,
            Err(_) => parse_server_url(DEFAULT_SERVER_URL)?,
        };

        let request_timeout = match std::env::var("EAZIKA_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "EAZIKA_REQUEST_TIMEOUT_SECS".to_string(),
                        format!("expected a number of seconds, got {raw:?}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        let debug_identity_fallback = std::env::var("EAZIKA_DEBUG_IDENTITY_FALLBACK")
            .map(|v| matches!(v.as_str(), "1" | "true"))
            .unwrap_or(false);

        Ok(Self {
            server_url,
            request_timeout,
            debug_identity_fallback,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // DEFAULT_SERVER_URL is a valid URL; the parse cannot fail
            #[allow(clippy::unwrap_used)]
            server_url: Url::parse(DEFAULT_SERVER_URL).unwrap(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            debug_identity_fallback: false,
        }
    }
}

fn parse_server_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("EAZIKA_SERVER_URL".to_string(), e.to_string())
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "EAZIKA_SERVER_URL".to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }
    Ok(url)
}
