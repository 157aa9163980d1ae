//! Main AbuseIPDB API client implementation.

use crate::api::{BlacklistApi, CheckApi};
use crate::keyfile::KeyStore;
use abuseip_core::{AbuseIpError, Result};
use reqwest::header;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// The AbuseIPDB API base URL
const DEFAULT_BASE_URL: &str = "https://api.abuseipdb.com";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Main AbuseIPDB API client
#[derive(Clone)]
pub struct AbuseIpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    keys: KeyStore,
    key_dir: Option<PathBuf>,
    base_url: String,
}

impl AbuseIpClient {
    /// Create a new client with default settings, resolving the API key
    /// from `.apikey` files (honouring the `APIKEY` path override)
    #[must_use]
    pub fn new() -> Self {
        AbuseIpClientBuilder::new().build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> AbuseIpClientBuilder {
        AbuseIpClientBuilder::new()
    }

    /// Access the single-address check endpoint
    #[must_use]
    pub fn check(&self) -> CheckApi<'_> {
        CheckApi::new(self)
    }

    /// Access the bulk blacklist endpoint
    #[must_use]
    pub fn blacklist(&self) -> BlacklistApi<'_> {
        BlacklistApi::new(self)
    }

    /// Perform a GET request expecting a JSON body
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.send_get(path, params).await?;
        self.handle_response(response).await
    }

    /// Perform a GET request expecting a plain-text body
    pub(crate) async fn get_text_with_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<String> {
        let response = self.send_get(path, params).await?;
        self.handle_text_response(response).await
    }

    async fn send_get(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Response> {
        let url = self.build_url(path, params);
        debug!(url = %url, "GET request");

        let mut request = self
            .inner
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json");

        // A store with no key leaves the header off; the service answers 401.
        if let Some(key) = self.inner.keys.resolve(self.inner.key_dir.as_deref()) {
            request = request.header("Key", key);
        }

        request
            .send()
            .await
            .map_err(|e| AbuseIpError::Http(e.to_string()))
    }

    /// Build a URL with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);

        let mut separator = '?';
        for (key, value) in params {
            url.push(separator);
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
            separator = '&';
        }

        url
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| AbuseIpError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(AbuseIpError::Json)
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Handle an API response whose success body is raw text
    async fn handle_text_response(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            response
                .text()
                .await
                .map_err(|e| AbuseIpError::Http(e.to_string()))
        } else {
            self.handle_error(status.as_u16(), response).await
        }
    }

    /// Convert an error response to an AbuseIpError
    async fn handle_error<T>(&self, status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let body = response.text().await.unwrap_or_default();
        warn!(status, body = %body, "API request failed");

        // Error bodies nest details under "errors": [{"detail": ..., "status": ...}]
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("errors")?
                    .get(0)?
                    .get("detail")?
                    .as_str()
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 => Err(AbuseIpError::Unauthorized),
            429 => Err(AbuseIpError::RateLimited { retry_after }),
            _ => Err(AbuseIpError::Api {
                code: status,
                message,
            }),
        }
    }
}

impl Default for AbuseIpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring an [`AbuseIpClient`]
pub struct AbuseIpClientBuilder {
    keys: KeyStore,
    key_dir: Option<PathBuf>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl AbuseIpClientBuilder {
    /// Create a new builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: KeyStore::from_env(),
            key_dir: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("abuseip-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Supply a pre-built key store (useful for tests and for sharing a
    /// cache across clients)
    #[must_use]
    pub fn key_store(mut self, keys: KeyStore) -> Self {
        self.keys = keys;
        self
    }

    /// Resolve the key against a fixed directory instead of the default
    /// current-directory/executable-directory chain
    #[must_use]
    pub fn key_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.key_dir = Some(dir.into());
        self
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> AbuseIpClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        AbuseIpClient {
            inner: Arc::new(ClientInner {
                http,
                keys: self.keys,
                key_dir: self.key_dir,
                base_url: self.base_url,
            }),
        }
    }
}

impl Default for AbuseIpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
