//! HTTP client utilities for the forge-login SDK
#![warn(missing_docs)]

use std::time::Duration;

/// Default timeout for provider HTTP requests (30 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every provider request.
///
/// GitHub's API rejects requests without a `User-Agent` header.
const USER_AGENT: &str = concat!("forge-login/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper
///
/// Wraps a `reqwest::Client` configured with sensible defaults for talking to
/// OAuth providers. Timeout and retry policy belong to this layer, not to the
/// login core: callers who need custom behaviour should build their own
/// `reqwest::Client` and pass it through [`HttpClient::from_client`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP client with a caller-supplied timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { inner }
    }

    /// Wrap an already-configured `reqwest::Client`
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Get the inner reqwest client
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
