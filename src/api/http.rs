//! HTTP utilities for admin REST API calls

use super::request::RequestConfig;
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Envelope `code` the backend uses for success
const SUCCESS_CODE: i64 = 200;

const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| c.is_control(), "")
}

/// Message for a failed envelope `code`.
/// Well-known codes take a fixed message over whatever the server sent.
fn envelope_message(code: i64, server_msg: Option<&str>) -> String {
    let fixed = match code {
        401 => Some("Authentication failed, cannot access system resources"),
        403 => Some("No permission for the current operation"),
        404 => Some("The requested resource does not exist"),
        _ => None,
    };

    fixed
        .or(server_msg.filter(|m| !m.is_empty()))
        .unwrap_or("Unknown system error, please contact the administrator")
        .to_string()
}

/// Interpret a successful HTTP response body.
///
/// Empty bodies become `Value::Null`. JSON objects carrying a numeric `code`
/// other than 200 are turned into errors; everything else is returned as
/// parsed.
pub fn parse_response(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_json::from_str(body).context("Failed to parse response JSON")?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        if code != SUCCESS_CODE {
            let msg = envelope_message(code, value.get("msg").and_then(Value::as_str));
            tracing::error!("API error: {} - {}", code, sanitize_for_log(&msg));
            return Err(anyhow::anyhow!("API error {}: {}", code, msg));
        }
    }

    Ok(value)
}

/// HTTP client wrapper for admin API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("adminctl/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send one request described by `request` against `base_url`
    pub async fn send(
        &self,
        base_url: &str,
        token: Option<&str>,
        request: &RequestConfig,
    ) -> Result<Value> {
        let url = request.full_url(base_url);
        tracing::debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), &url);

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }

        if let Some(data) = &request.data {
            let body = serde_json::to_vec(data).context("Failed to serialize request body")?;
            builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
        }

        let response = builder.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out"
            } else if e.is_connect() {
                "Failed to connect to backend"
            } else {
                "Failed to send request"
            };
            anyhow::Error::new(e).context(message)
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
            return Err(anyhow::anyhow!("API request failed: {}", status));
        }

        parse_response(&body)
    }
}

/// Format an API error for display
pub fn format_api_error(error: &anyhow::Error) -> String {
    let error_str = error.to_string();

    // Business errors already carry a message meant for the user
    if let Some(rest) = error_str.strip_prefix("API error ") {
        if let Some((_, msg)) = rest.split_once(": ") {
            return sanitize_for_log(msg);
        }
    }

    if error_str == "Request timed out" {
        return "Request timed out. The backend may be overloaded.".to_string();
    }
    if error_str.starts_with("Failed to connect") {
        return "Cannot reach the backend. Check the base URL and your network.".to_string();
    }

    if let Some(status) = error_str.strip_prefix("API request failed: ") {
        let code = status.split_whitespace().next().unwrap_or_default();
        let message = match code {
            "401" => "Authentication failed. Check your token.",
            "403" => "Permission denied.",
            "404" => "Resource not found.",
            "500" | "502" | "503" => "Backend error. Please try again later.",
            _ => "Request failed. Check your network connection and try again.",
        };
        return message.to_string();
    }

    let sanitized = error_str
        .chars()
        .filter(|c| !c.is_control())
        .take(80)
        .collect::<String>();

    if sanitized.chars().count() < error_str.chars().count() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}
