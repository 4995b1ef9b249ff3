//! Request/response types and the executor trait

use crate::error::{Error, Result};
use crate::types::{JsonValue, Method};
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Issues one HTTP request and hands back the raw status and body
///
/// Implementations attach credentials according to `ApiRequest::auth`:
/// always for `Auth::Required` (failing with `Error::RequiresCredentials`
/// when none are configured), and for `Auth::Optional` only when some are.
/// A non-success status is not an error at this layer.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute a single request
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// When the session cookie goes on a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Auth {
    /// Never sent
    #[default]
    None,
    /// Sent if the account has one; the remote may show more to a signed-in viewer
    Optional,
    /// Must be sent; the call fails fast without it
    Required,
}

/// A single request to issue through a `RequestExecutor`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, or a path resolved against the executor's base URL
    pub url: String,
    /// JSON body
    pub body: Option<JsonValue>,
    /// Session cookie policy
    pub auth: Auth,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            auth: Auth::None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a PATCH request
    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Create a DELETE request
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Mark the request as requiring credentials
    #[must_use]
    pub fn authorized(mut self) -> Self {
        self.auth = Auth::Required;
        self
    }

    /// Send credentials only if the account has them
    #[must_use]
    pub fn with_session(mut self) -> Self {
        self.auth = Auth::Optional;
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response from a `RequestExecutor`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Bytes,
}

impl ApiResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as (lossy) UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::decode(e.to_string()))
    }

    /// Pass successful responses through, map everything else with `status_error`
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(status_error(self.status, &self.body))
        }
    }
}

/// Error envelope returned by the upstream API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEntry {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user_facing_message: Option<String>,
}

/// Extract the first human-readable message from an upstream error body
///
/// Prefers `userFacingMessage` over `message`. Returns `None` when the body
/// is not an error envelope.
pub fn upstream_message(body: &[u8]) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).ok()?;
    let entry = envelope.errors.into_iter().next()?;
    entry
        .user_facing_message
        .filter(|m| !m.is_empty())
        .or(entry.message.filter(|m| !m.is_empty()))
}

/// Map a non-success status code to an error
///
/// 401 and 403 both mean the credential was rejected for this API.
pub fn status_error(status: u16, body: &[u8]) -> Error {
    let message = upstream_message(body);
    match status {
        400 => Error::bad_request(message.unwrap_or_else(|| "request rejected".to_string())),
        401 | 403 => Error::unauthorized(
            message.unwrap_or_else(|| "credential rejected by remote".to_string()),
        ),
        404 => Error::not_found(message.unwrap_or_else(|| "requested resource".to_string())),
        _ => Error::unexpected_status(
            status,
            message.unwrap_or_else(|| String::from_utf8_lossy(body).into_owned()),
        ),
    }
}
