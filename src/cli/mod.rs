//! CLI module
//!
//! Command-line interface for group operations.
//!
//! # Commands
//!
//! - `info` - Show the group snapshot
//! - `roles` / `member-role` - Inspect the rank ordering
//! - `promote` / `demote` / `change-rank` / `set-rank` - Move members
//! - `exile` - Remove a member
//! - `shout` / `post-shout` - Read or replace the shout
//! - `join-requests` / `posts` - Stream paginated listings

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
