//! # Value Objects

use serde_json::Value;

use super::TransportError;

/// HTTP method used by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST with a JSON body
    Post,
}

/// A completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Requested URL.
    pub url: String,
    /// Status code.
    pub status: u16,
    /// Raw body.
    pub body: String,
}

impl HttpResponse {
    /// Build a response.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Status counts against the node's health (>= 400).
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }

    /// The `error` string of a JSON error body, if any.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<Value>(&self.body)
            .ok()?
            .get("error")?
            .as_str()
            .map(str::to_string)
    }
}

/// `base + path` with URL-encoded query parameters.
pub fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<String, TransportError> {
    let raw = format!("{}{}", base.trim_end_matches('/'), path);
    let parsed = if params.is_empty() {
        reqwest::Url::parse(&raw)
    } else {
        reqwest::Url::parse_with_params(&raw, params)
    };
    let url = parsed.map_err(|e| TransportError::InvalidUrl(format!("{raw}: {e}")))?;
    Ok(url.to_string())
}
