//! HTTP module
//!
//! The authenticated request executor every operation goes through.
//!
//! # Features
//!
//! - **Executor Trait**: `RequestExecutor` is the seam operations depend on
//! - **Per-call Timeout**: every request carries its own timeout
//! - **Authentication**: session cookie attached when a call needs it or the account has one
//! - **Status Mapping**: one place that turns non-success codes into errors
//!
//! No retries and no rate limiting happen here; both are left to callers.

mod client;
mod types;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use types::{status_error, upstream_message, ApiRequest, ApiResponse, Auth, RequestExecutor};
