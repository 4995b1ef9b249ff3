//! Authentication module
//!
//! An `Account` carries the security cookie used for authorized calls.
//! Operations ask the `Credentials` trait whether an identity is configured
//! and fail fast with `RequiresCredentials` when it is not.

mod account;

pub use account::{Account, Credentials, SECURITY_COOKIE_NAME};
