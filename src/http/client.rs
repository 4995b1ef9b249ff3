//! reqwest-backed request executor
//!
//! Provides the HTTP client that handles:
//! - Per-call timeouts
//! - Session cookie attachment for authorized and session-aware calls
//! - Mapping transport failures into crate errors

use super::types::{ApiRequest, ApiResponse, Auth, RequestExecutor};
use crate::auth::{Account, Credentials};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Timeout for each individual request
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("groupkit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

impl From<&ClientConfig> for HttpClientConfig {
    fn from(config: &ClientConfig) -> Self {
        Self::builder()
            .base_url(&config.groups_api_url)
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client implementing `RequestExecutor`
///
/// The underlying connection pool is shared by every call made through
/// one client, so clones are cheap and reuse connections.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    account: Account,
}

impl HttpClient {
    /// Create a client with default configuration
    pub fn new(account: Account) -> Result<Self> {
        Self::with_config(HttpClientConfig::default(), account)
    }

    /// Create a client with custom configuration
    pub fn with_config(config: HttpClientConfig, account: Account) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            account,
        })
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[async_trait]
impl RequestExecutor for HttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let full_url = self.build_url(&request.url);

        let mut req = self
            .client
            .request(request.method.into(), &full_url)
            .timeout(self.config.timeout);

        match request.auth {
            Auth::Required => req = self.account.apply(req)?,
            Auth::Optional if self.account.is_authenticated() => {
                req = self.account.apply(req)?;
            }
            Auth::Optional | Auth::None => {}
        }

        if let Some(ref body) = request.body {
            req = req.json(body);
        }

        debug!("{} {}", request.method, full_url);

        let response = req.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        debug!("{} {} -> {}", request.method, full_url, status);
        Ok(ApiResponse { status, body })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}
