//! Figma API client with uniform error reporting
//!
//! Every call is a single attempt: no retries, no caching, and no timeout on
//! top of the transport defaults.

use anyhow::Result;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";

/// Status reported when the transport fails before any response arrives
const FALLBACK_STATUS: u16 = 500;

/// Failure of a single Figma API operation
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message} (status {status})")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// No access token configured; reported before any network call
    pub fn missing_token() -> Self {
        Self::new(401, "No Figma access token provided")
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(FALLBACK_STATUS);
        Self::new(status, err.to_string())
    }

    pub(crate) fn io(err: std::io::Error) -> Self {
        Self::new(FALLBACK_STATUS, err.to_string())
    }
}

/// Uniform result shape: `{success: true, data}` or `{success: false, error}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> From<std::result::Result<T, ApiError>> for ApiResponse<T> {
    fn from(result: std::result::Result<T, ApiError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Self {
                success: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Figma API client
///
/// The token is optional at construction time; every API operation checks for
/// it and fails with a 401-style [`ApiError`] when it is absent.
#[derive(Clone)]
pub struct FigmaClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl FigmaClient {
    /// Create a client against `base_url`, normally [`FIGMA_API_BASE`]
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("figprompt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Same transport and API root, different credentials
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: self.base_url.clone(),
        }
    }

    /// Get a reference to the underlying HTTP client
    pub fn http(&self) -> &Client {
        &self.client
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn token(&self) -> std::result::Result<&str, ApiError> {
        self.token.as_deref().ok_or_else(ApiError::missing_token)
    }

    /// Authenticated GET returning the JSON body
    pub async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<Value, ApiError> {
        let token = self.token()?;
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("X-Figma-Token", token)
            .query(query)
            .send()
            .await
            .map_err(ApiError::transport)?;

        read_json(response).await
    }
}

async fn read_json(response: Response) -> std::result::Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body: Option<Value> = response.json().await.ok();
        let mut error = ApiError::new(
            status.as_u16(),
            format!("Request failed with status code {}", status.as_u16()),
        );
        if let Some(reason) = body.as_ref().and_then(error_reason) {
            error = error.with_reason(reason);
        }
        return Err(error);
    }

    response.json().await.map_err(ApiError::transport)
}

/// Figma error bodies carry either `message` or `err`
fn error_reason(body: &Value) -> Option<String> {
    body.get("message")
        .or_else(|| body.get("err"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
