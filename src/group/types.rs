//! Group domain types
//!
//! Field-by-field mirrors of the groups API JSON payloads.

use crate::types::{GroupId, RoleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Users
// ============================================================================

/// A platform user as embedded in group payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User id
    #[serde(alias = "id")]
    pub user_id: UserId,
    /// Account name
    #[serde(default, alias = "name")]
    pub username: String,
    /// Display name
    #[serde(default)]
    pub display_name: String,
    /// Verified badge
    #[serde(default)]
    pub has_verified_badge: bool,
}

// ============================================================================
// Roles
// ============================================================================

/// A group role (rank)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role id, unique within the platform
    pub id: RoleId,
    /// Role name
    #[serde(default)]
    pub name: String,
    /// Rank value 0-255; 255 is the owner rank
    pub rank: u8,
    /// Members holding this role, when the endpoint reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u64>,
}

impl Role {
    /// Create a role
    pub fn new(id: RoleId, name: impl Into<String>, rank: u8) -> Self {
        Self {
            id,
            name: name.into(),
            rank,
            member_count: None,
        }
    }

    /// Set the member count
    #[must_use]
    pub fn with_member_count(mut self, count: u64) -> Self {
        self.member_count = Some(count);
        self
    }
}

/// `GET /v1/groups/{id}/roles`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupRoles {
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// `GET /v1/users/{id}/groups/roles`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserGroupRoles {
    #[serde(default)]
    pub data: Vec<UserGroupRelation>,
}

/// One group membership of a user
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserGroupRelation {
    pub group: GroupRef,
    pub role: Role,
}

// ============================================================================
// Groups
// ============================================================================

/// Lightweight back-reference from an item to the group it came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    /// Group id
    pub id: GroupId,
    /// Group name
    #[serde(default)]
    pub name: String,
}

/// The group's pinned status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shout {
    /// Message text
    #[serde(default)]
    pub body: String,
    /// Who posted it
    #[serde(default)]
    pub poster: Option<User>,
    /// When it was first posted
    pub created: DateTime<Utc>,
    /// When it was last changed
    pub updated: DateTime<Utc>,
}

/// Snapshot of a group as returned by `GET /v1/groups/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group id
    pub id: GroupId,
    /// Group name
    #[serde(default)]
    pub name: String,
    /// Description text
    #[serde(default)]
    pub description: String,
    /// Owner; absent for ownerless groups
    #[serde(default)]
    pub owner: Option<User>,
    /// Shout; absent when none is set or the caller may not see it
    #[serde(default)]
    pub shout: Option<Shout>,
    /// Number of members
    #[serde(default)]
    pub member_count: u64,
    /// Whether anyone may join without a request
    #[serde(default)]
    pub public_entry_allowed: bool,
    /// Whether the group is locked
    #[serde(default)]
    pub is_locked: bool,
    /// Verified badge
    #[serde(default)]
    pub has_verified_badge: bool,
}

impl Group {
    /// Back-reference to this group
    pub fn to_ref(&self) -> GroupRef {
        GroupRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

// ============================================================================
// Paged Items
// ============================================================================

/// A pending request to join the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    /// User asking to join
    pub requester: User,
    /// When the request was made
    pub created: DateTime<Utc>,
    /// Group the request belongs to
    #[serde(default, skip_deserializing)]
    pub group: GroupRef,
}

/// A post on the group wall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post id
    pub id: u64,
    /// Author; absent for deleted accounts
    #[serde(default)]
    pub poster: Option<User>,
    /// Post text
    #[serde(default)]
    pub body: String,
    /// When the post was made
    pub created: DateTime<Utc>,
    /// When the post was last edited
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    /// Group the post belongs to
    #[serde(default, skip_deserializing)]
    pub group: GroupRef,
}
