//! HTTP client wrapper.

use crate::config::NetworkConfig;
use crate::error::{Result, ShortcutError};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// HTTP client with a bounded request timeout.
pub struct HttpClient {
    client: Client,
    /// Timeout applied to the whole request, body included.
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_timeout(NetworkConfig::DOWNLOAD_TIMEOUT)
    }

    /// Create a new HTTP client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(NetworkConfig::CONNECT_TIMEOUT.min(timeout))
            .user_agent(NetworkConfig::USER_AGENT)
            .build()
            .map_err(|e| ShortcutError::Network {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(e),
            })?;

        Ok(Self { client, timeout })
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Perform a GET request.
    ///
    /// Only transport failures are errors; the caller inspects the status.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_error(e))
    }

    /// Convert a reqwest error, reporting timeouts with the configured duration.
    pub fn map_error(&self, err: reqwest::Error) -> ShortcutError {
        if err.is_timeout() {
            ShortcutError::Timeout(self.timeout)
        } else {
            ShortcutError::from(err)
        }
    }
}
