//! HTTP transport for MEGA API requests.

use std::time::Duration;

use reqwest::Client;

use crate::error::{Error, Result};

/// Fixed per-request timeout applied to every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(160);

/// Thin wrapper around the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a new HTTP client that routes through a proxy.
    ///
    /// # Arguments
    /// * `proxy` - Proxy URL (e.g., "http://proxy:8080" or "socks5://proxy:1080")
    pub fn with_proxy(proxy: &str) -> Result<Self> {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| Error::request(format!("Invalid proxy: {e}")))?;
        let client = Client::builder()
            .proxy(proxy)
            .build()
            .map_err(|e| Error::request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// POST a JSON body and return the response text.
    ///
    /// Non-success HTTP statuses are reported as request errors without a
    /// MEGA error code.
    pub async fn post(&self, url: &str, query: &[(String, String)], body: String) -> Result<String> {
        let response = self
            .client
            .post(url)
            .query(query)
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::request(format!("HTTP error: {status}")));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
