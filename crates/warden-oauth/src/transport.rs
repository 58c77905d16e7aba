//! Blocking HTTP transport used for provider API calls.
//!
//! Providers never talk to the network directly; they go through an
//! [`HttpTransport`] so tests can substitute a canned one. Timeouts are a
//! transport concern and are not imposed by the providers.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::{ProviderError, Result};

/// Synchronous HTTP GET, returning the response body on success.
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Fetch `url`. Network failures and non-success statuses are
    /// [`ProviderError::Transport`].
    fn get(&self, url: &Url) -> Result<String>;
}

/// [`HttpTransport`] backed by `reqwest::blocking`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport. `timeout` bounds the whole request when set.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .pool_max_idle_per_host(5)
            .tcp_keepalive(Duration::from_secs(30));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ProviderError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client (shares its connection pool).
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &Url) -> Result<String> {
        tracing::trace!(url = %redact_query(url), "sending provider GET");

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .map_err(|e| ProviderError::Transport(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ProviderError::Transport(format!(
                "HTTP error {}: {}",
                status, body
            )));
        }

        response
            .text()
            .map_err(|e| ProviderError::Transport(format!("failed to read response body: {}", e)))
    }
}

/// Render a URL for logging without its query string (which may carry tokens).
pub(crate) fn redact_query(url: &Url) -> String {
    let mut redacted = url.clone();
    redacted.set_query(None);
    redacted.to_string()
}
