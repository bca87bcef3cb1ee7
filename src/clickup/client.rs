//! ClickUp Client
//!
//! Main client for the ClickUp API, combining the static token with the
//! HTTP transport.

use super::http::{ApiResponse, ClickupHttpClient};
use super::request::ApiRequest;
use crate::output;
use anyhow::{Context, Result};
use url::Url;

/// Default versioned API root
pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2/";

/// Main ClickUp client
#[derive(Clone)]
pub struct ClickupClient {
    http: ClickupHttpClient,
    base_url: Url,
    token: String,
    echo_urls: bool,
}

impl ClickupClient {
    /// Create a new client. The token is sent verbatim in `Authorization`.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        Ok(Self {
            http: ClickupHttpClient::new()?,
            base_url: parse_base_url(base_url)?,
            token: token.to_string(),
            echo_urls: false,
        })
    }

    /// Print every request URL before sending it
    pub fn echo_urls(mut self, echo: bool) -> Self {
        self.echo_urls = echo;
        self
    }

    pub fn echoes_urls(&self) -> bool {
        self.echo_urls
    }

    /// Absolute URL for a request
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url> {
        let relative = request.relative_url()?;
        self.base_url
            .join(&relative)
            .with_context(|| format!("Invalid request path {}", relative))
    }

    /// Send a request
    pub async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(request)?;
        if self.echoes_urls() {
            output::echo_url(url.as_str());
        }
        self.http
            .execute(request.method, url, &self.token, request.body.as_ref())
            .await
    }
}

/// Parse the API root, making sure relative joins keep its last segment
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base).with_context(|| format!("Invalid base URL {}", base_url))
}
