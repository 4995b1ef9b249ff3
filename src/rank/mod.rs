//! Rank navigation
//!
//! Moves a member through a group's rank ordering. Roles are ordered by
//! rank value, but a member's position is found by role id because rank
//! values need not be contiguous. Rank 255 is never a valid target.

mod navigator;

pub use navigator::{locate_role, navigate, sort_roles, RankChange, SENTINEL_RANK};
