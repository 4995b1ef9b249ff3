//! Group module
//!
//! Membership, rank and content operations for a single group.
//!
//! # Overview
//!
//! A `GroupClient` wraps a fetched `Group` snapshot together with the
//! request executor and credentials it was loaded with. Rank changes are
//! computed with the `rank` module; join requests and wall posts are
//! streamed with the `pagination` module.

mod client;
mod types;

pub use client::GroupClient;
pub use types::{Group, GroupRef, JoinRequest, Post, Role, Shout, User};
