// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # groupkit
//!
//! An async client for a social platform's groups API: member ranks,
//! shouts, exile, and cursor-paginated listings of join requests and wall
//! posts.
//!
//! ## Features
//!
//! - **Rank navigation**: promote, demote or move a member by any number of ranks
//! - **Streaming pagination**: pages arrive one at a time with backpressure
//! - **Cookie auth**: authorized calls fail fast when no cookie is configured
//! - **YAML config**: endpoints, timeouts and wall query settings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use groupkit::{Account, ClientConfig, GroupClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let account = Account::new("cookie-value");
//!     let client = GroupClient::connect(1234, account, ClientConfig::default()).await?;
//!
//!     let change = client.promote(5678).await?;
//!     println!("{} -> {}", change.from.name, change.to.name);
//!
//!     let mut posts = client.fetch_group_posts(Some(2))?;
//!     while let Some(page) = posts.next_page().await {
//!         for post in page {
//!             println!("{}", post.body);
//!         }
//!     }
//!     if let Some(err) = posts.take_error() {
//!         return Err(err);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         GroupClient                          │
//! │  shout   roles   member role   rank changes   exile   streams │
//! └──────────────────────────────────────────────────────────────┘
//!                │                  │                  │
//! ┌──────────────┴───┬──────────────┴──────┬───────────┴─────────┐
//! │      Rank        │     Pagination      │        Auth         │
//! ├──────────────────┼─────────────────────┼─────────────────────┤
//! │ sort / locate    │ cursor follow       │ security cookie     │
//! │ navigate by Δ    │ page limit          │ fail-fast check     │
//! │ sentinel guard   │ backpressure        │                     │
//! └──────────────────┴─────────────────────┴─────────────────────┘
//!                               │
//!                     RequestExecutor (HTTP)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Account credentials
pub mod auth;

/// HTTP transport
pub mod http;

/// Cursor pagination streams
pub mod pagination;

/// Rank navigation over a group's role ladder
pub mod rank;

/// Group client and domain records
pub mod group;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{Account, Credentials};
pub use config::{ClientConfig, WallConfig};
pub use group::{Group, GroupClient, GroupRef, JoinRequest, Post, Role, Shout, User};
pub use http::{ApiRequest, ApiResponse, Auth, HttpClient, RequestExecutor};
pub use pagination::{Page, PageStream};
pub use rank::{RankChange, SENTINEL_RANK};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
