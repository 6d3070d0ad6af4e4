//! Admin API client
//!
//! Combines the HTTP transport with base URL resolution and the bearer token.
//! Every resource operation goes through [`ApiClient::request`].

use super::http::{HttpClient, DEFAULT_TIMEOUT};
use super::request::RequestConfig;
use crate::config::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Main admin API client
#[derive(Clone)]
pub struct ApiClient {
    pub http: HttpClient,
    pub base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for `base_url` with the default timeout and no token
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(DEFAULT_TIMEOUT)?,
            base_url: validate_base_url(base_url)?,
            token: None,
        })
    }

    /// Build a client from resolved configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Self::new(&config.effective_base_url())?
            .with_timeout(config.effective_timeout())?;

        Ok(match config.effective_token() {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = HttpClient::new(timeout)?;
        Ok(self)
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Send a request and return the parsed response
    pub async fn request(&self, request: RequestConfig) -> Result<Value> {
        self.http
            .send(&self.base_url, self.token.as_deref(), &request)
            .await
    }
}

/// Check that `base_url` is an absolute http(s) URL and strip any trailing `/`
pub fn validate_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow::anyhow!(
            "Unsupported base URL scheme: {}",
            parsed.scheme()
        ));
    }

    Ok(base_url.trim_end_matches('/').to_string())
}
