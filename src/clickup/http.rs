//! HTTP transport for ClickUp REST API calls

use super::request::Method;
use crate::error::CommandError;
use crate::output;
use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Status code and parsed body of one exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Keep the raw body, turning an error status into [`CommandError::Remote`]
    pub fn into_body(self) -> Result<Value, CommandError> {
        if self.is_error() {
            return Err(CommandError::Remote {
                status: self.status,
                body: self.body,
            });
        }
        Ok(self.body)
    }

    /// Decode a successful body into a typed record
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, CommandError> {
        let body = self.into_body()?;
        serde_json::from_value(body).map_err(|e| CommandError::MalformedResponse(e.to_string()))
    }
}

/// HTTP client wrapper for ClickUp API calls
#[derive(Clone)]
pub struct ClickupHttpClient {
    client: Client,
}

impl ClickupHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("clicli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send one request. Error statuses still return their body; only an
    /// unreadable or non-JSON body is an error here.
    pub async fn execute(
        &self,
        method: Method,
        url: Url,
        token: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        tracing::debug!("{} {}", method.as_str(), url);

        let mut request = self
            .client
            .request(method.into(), url)
            .header(AUTHORIZATION, token);

        if method != Method::Get {
            if let Some(body) = body {
                let text = serde_json::to_string(body).context("Failed to encode request body")?;
                request = request.header(CONTENT_TYPE, "application/json").body(text);
            }
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| {
                tracing::error!("Undecodable response: {}", sanitize_for_log(&text));
                CommandError::MalformedResponse(e.to_string())
            })?
        };

        if status.as_u16() >= 400 {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            output::error(&format!(
                "server responded with a {} status code.",
                status.as_u16()
            ));
            eprintln!("{}", body);
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}
