//! Account credentials
//!
//! Handles attaching the security cookie to outgoing requests.

use crate::error::{Error, Result};
use reqwest::header::COOKIE;
use reqwest::RequestBuilder;

/// Name of the cookie that carries the account session
pub const SECURITY_COOKIE_NAME: &str = ".ROBLOSECURITY";

/// Anything that can report whether a usable identity is configured
pub trait Credentials: Send + Sync {
    /// Returns true when authorized calls can be attempted
    fn is_authenticated(&self) -> bool;
}

/// Account identity used for authorized requests
#[derive(Clone, Default)]
pub struct Account {
    security_cookie: Option<String>,
}

impl Account {
    /// Create an account from a security cookie
    pub fn new(security_cookie: impl Into<String>) -> Self {
        let cookie: String = security_cookie.into();
        let cookie = cookie.trim().to_string();
        Self {
            security_cookie: (!cookie.is_empty()).then_some(cookie),
        }
    }

    /// An account without credentials; only public endpoints work
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Create an account from an optional cookie (e.g. from CLI/env)
    pub fn from_option(security_cookie: Option<String>) -> Self {
        security_cookie.map_or_else(Self::anonymous, Self::new)
    }

    /// Value for the `Cookie` header, if a cookie is configured
    pub fn cookie_header(&self) -> Option<String> {
        self.security_cookie
            .as_ref()
            .map(|cookie| format!("{SECURITY_COOKIE_NAME}={cookie}"))
    }

    /// Attach the session cookie to a request builder
    pub fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let header = self.cookie_header().ok_or(Error::RequiresCredentials)?;
        Ok(req.header(COOKIE, header))
    }
}

impl Credentials for Account {
    fn is_authenticated(&self) -> bool {
        self.security_cookie.is_some()
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field(
                "security_cookie",
                &self.security_cookie.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
