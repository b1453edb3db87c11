//! Gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PRODUCTS_BASE_URL` - Base URL of the products service
//! - `CATEGORIES_BASE_URL` - Base URL of the categories service
//! - `SELLERS_BASE_URL` - Base URL of the sellers service
//! - `REVIEWS_BASE_URL` - Base URL of the reviews service
//! - `QA_BASE_URL` - Base URL of the Q&A service
//!
//! ## Optional
//! - `SEARCH_HOST` - Bind address (default: 127.0.0.1)
//! - `SEARCH_PORT` - Listen port (default: 3000)
//! - `UPSTREAM_RETRY_MAX_ATTEMPTS` - Extra attempts after a retryable
//!   upstream failure (default: 2)
//! - `UPSTREAM_TIMEOUT_MS` - Per-request timeout for upstream calls
//!   (default: 3000). A timeout classifies as an upstream failure and
//!   consumes one retry attempt.
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Search gateway configuration.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URLs of the five upstream services
    pub domains: Domains,
    /// Retry policy shared by all upstream clients
    pub retry: RetryConfig,
    /// Upstream HTTP client settings
    pub http: HttpConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Base URLs of the upstream services, normalized without a trailing slash.
#[derive(Debug, Clone)]
pub struct Domains {
    pub products_base_url: String,
    pub categories_base_url: String,
    pub sellers_base_url: String,
    pub reviews_base_url: String,
    pub qa_base_url: String,
}

/// Bounded-attempt retry policy, identical across all upstream clients.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Extra attempts after the first; total attempts = 1 + `max_attempts`.
    pub max_attempts: u32,
}

/// Upstream HTTP client settings.
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Per-request timeout applied by the shared HTTP client.
    pub timeout: Duration,
}

impl SearchConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SEARCH_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SEARCH_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SEARCH_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SEARCH_PORT".to_string(), e.to_string()))?;

        let domains = Domains::from_env()?;

        let max_attempts = get_env_or_default("UPSTREAM_RETRY_MAX_ATTEMPTS", "2")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UPSTREAM_RETRY_MAX_ATTEMPTS".to_string(), e.to_string())
            })?;
        let timeout_ms = get_env_or_default("UPSTREAM_TIMEOUT_MS", "3000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UPSTREAM_TIMEOUT_MS".to_string(), e.to_string())
            })?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            domains,
            retry: RetryConfig { max_attempts },
            http: HttpConfig {
                timeout: Duration::from_millis(timeout_ms),
            },
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Domains {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            products_base_url: get_base_url("PRODUCTS_BASE_URL")?,
            categories_base_url: get_base_url("CATEGORIES_BASE_URL")?,
            sellers_base_url: get_base_url("SELLERS_BASE_URL")?,
            reviews_base_url: get_base_url("REVIEWS_BASE_URL")?,
            qa_base_url: get_base_url("QA_BASE_URL")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a required base URL and normalize it.
fn get_base_url(key: &str) -> Result<String, ConfigError> {
    let value = get_required_env(key)?;
    normalize_base_url(key, &value)
}

/// Validate that a base URL is an absolute http(s) URL and strip any
/// trailing slash so path templates can be appended verbatim.
fn normalize_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}
