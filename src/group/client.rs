//! Group operations

use super::types::{Group, GroupRef, GroupRoles, JoinRequest, Post, Role, Shout, UserGroupRoles};
use crate::auth::{Account, Credentials};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{status_error, ApiRequest, HttpClient, HttpClientConfig, RequestExecutor};
use crate::pagination::{PageRequest, PageStream};
use crate::rank::{self, RankChange};
use crate::types::{GroupId, RoleId, UserId};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// Client bound to one group
///
/// Rank changes read the role list and then write a new role, so two
/// concurrent changes on the same member can race. Callers doing that must
/// serialize them.
#[derive(Clone)]
pub struct GroupClient {
    group: Group,
    executor: Arc<dyn RequestExecutor>,
    credentials: Arc<dyn Credentials>,
    config: ClientConfig,
}

impl GroupClient {
    /// Fetch a group and bind a client to it
    pub async fn fetch(
        group_id: GroupId,
        executor: Arc<dyn RequestExecutor>,
        credentials: Arc<dyn Credentials>,
        config: ClientConfig,
    ) -> Result<Self> {
        let group = fetch_group(executor.as_ref(), &config, group_id).await?;
        Ok(Self::from_snapshot(group, executor, credentials, config))
    }

    /// Fetch a group through an `HttpClient` built from `config`
    pub async fn connect(group_id: GroupId, account: Account, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(HttpClientConfig::from(&config), account.clone())?;
        Self::fetch(group_id, Arc::new(http), Arc::new(account), config).await
    }

    /// Bind a client to an already fetched snapshot
    pub fn from_snapshot(
        group: Group,
        executor: Arc<dyn RequestExecutor>,
        credentials: Arc<dyn Credentials>,
        config: ClientConfig,
    ) -> Self {
        Self {
            group,
            executor,
            credentials,
            config,
        }
    }

    /// The group snapshot
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// Group id
    pub fn id(&self) -> GroupId {
        self.group.id
    }

    /// Reload the snapshot (name, shout, counts)
    pub async fn refresh(&mut self) -> Result<()> {
        self.group = fetch_group(self.executor.as_ref(), &self.config, self.group.id).await?;
        Ok(())
    }

    // ========================================================================
    // Shout
    // ========================================================================

    /// The shout from the snapshot; no network call
    pub fn get_shout(&self) -> Result<&Shout> {
        self.group.shout.as_ref().ok_or(Error::ShoutUnavailable)
    }

    /// Replace the group shout
    pub async fn post_shout(&self, message: &str) -> Result<()> {
        self.require_credentials()?;
        let url = endpoint(&self.config, &format!("v1/groups/{}/status", self.group.id))?;

        self.executor
            .execute(
                ApiRequest::patch(url)
                    .authorized()
                    .json(json!({ "message": message })),
            )
            .await?
            .error_for_status()?;

        info!("Posted shout to group {}", self.group.id);
        Ok(())
    }

    // ========================================================================
    // Roles
    // ========================================================================

    /// All roles of the group, sorted ascending by rank
    pub async fn get_group_roles(&self) -> Result<Vec<Role>> {
        let url = endpoint(&self.config, &format!("v1/groups/{}/roles", self.group.id))?;
        let mut roles = self
            .executor
            .execute(ApiRequest::get(url).with_session())
            .await?
            .error_for_status()?
            .json::<GroupRoles>()?
            .roles;

        rank::sort_roles(&mut roles);
        Ok(roles)
    }

    /// The role `user_id` holds in this group
    pub async fn get_member_role(&self, user_id: UserId) -> Result<Role> {
        let url = endpoint(&self.config, &format!("v1/users/{user_id}/groups/roles"))?;
        let memberships: UserGroupRoles = self
            .executor
            .execute(ApiRequest::get(url).with_session())
            .await?
            .error_for_status()?
            .json()?;

        memberships
            .data
            .into_iter()
            .find(|relation| relation.group.id == self.group.id)
            .map(|relation| relation.role)
            .ok_or_else(|| {
                Error::not_found(format!("user {user_id} in group {}", self.group.id))
            })
    }

    /// Assign `role_id` to `user_id`
    pub async fn set_rank(&self, user_id: UserId, role_id: RoleId) -> Result<()> {
        self.require_credentials()?;
        let url = endpoint(
            &self.config,
            &format!("v1/groups/{}/users/{user_id}", self.group.id),
        )?;

        let response = self
            .executor
            .execute(
                ApiRequest::patch(url)
                    .authorized()
                    .json(json!({ "roleId": role_id })),
            )
            .await?;

        if !response.is_success() {
            debug!(
                "Rank assignment for user {} rejected: {}",
                user_id,
                response.text()
            );
            return Err(Error::RankAssignmentFailed {
                status: response.status,
            });
        }

        info!(
            "Assigned role {} to user {} in group {}",
            role_id, user_id, self.group.id
        );
        Ok(())
    }

    /// Move `user_id` by `delta` positions in the rank ordering
    pub async fn change_rank(&self, user_id: UserId, delta: i64) -> Result<RankChange> {
        self.require_credentials()?;

        let roles = self.get_group_roles().await?;
        let current = self.get_member_role(user_id).await?;
        let target = rank::navigate(&roles, &current, delta)?.clone();

        self.set_rank(user_id, target.id).await?;

        info!(
            "Changed rank of user {} in group {}: {} ({}) -> {} ({})",
            user_id, self.group.id, current.name, current.rank, target.name, target.rank
        );
        Ok(RankChange {
            from: current,
            to: target,
        })
    }

    /// Move `user_id` one rank up
    pub async fn promote(&self, user_id: UserId) -> Result<RankChange> {
        self.require_credentials()?;
        self.change_rank(user_id, 1).await
    }

    /// Move `user_id` one rank down
    pub async fn demote(&self, user_id: UserId) -> Result<RankChange> {
        self.require_credentials()?;
        self.change_rank(user_id, -1).await
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Remove `user_id` from the group
    pub async fn exile_member(&self, user_id: UserId) -> Result<()> {
        self.require_credentials()?;
        let url = endpoint(
            &self.config,
            &format!("v1/groups/{}/users/{user_id}", self.group.id),
        )?;

        self.executor
            .execute(ApiRequest::delete(url).authorized())
            .await?
            .error_for_status()?;

        info!("Exiled user {} from group {}", user_id, self.group.id);
        Ok(())
    }

    // ========================================================================
    // Streams
    // ========================================================================

    /// Stream pending join requests, `page_limit` pages at most
    pub fn fetch_join_requests(&self, page_limit: Option<u32>) -> Result<PageStream<JoinRequest>> {
        self.require_credentials()?;
        let url = endpoint(
            &self.config,
            &format!("v1/groups/{}/join-requests", self.group.id),
        )?;

        let group = self.group.to_ref();
        Ok(PageStream::spawn(
            Arc::clone(&self.executor),
            PageRequest::new(url).authorized().page_limit(page_limit),
            move |request: &mut JoinRequest| request.group = group.clone(),
        ))
    }

    /// Stream wall posts, `page_limit` pages at most
    pub fn fetch_group_posts(&self, page_limit: Option<u32>) -> Result<PageStream<Post>> {
        let mut url = endpoint(
            &self.config,
            &format!("v2/groups/{}/wall/posts", self.group.id),
        )?;
        url.query_pairs_mut()
            .append_pair("limit", &self.config.wall.page_size.to_string())
            .append_pair("sortOrder", self.config.wall.sort_order.as_str());

        let group: GroupRef = self.group.to_ref();
        Ok(PageStream::spawn(
            Arc::clone(&self.executor),
            PageRequest::new(url).with_session().page_limit(page_limit),
            move |post: &mut Post| post.group = group.clone(),
        ))
    }

    fn require_credentials(&self) -> Result<()> {
        if self.credentials.is_authenticated() {
            Ok(())
        } else {
            Err(Error::RequiresCredentials)
        }
    }
}

impl std::fmt::Debug for GroupClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupClient")
            .field("group", &self.group.id)
            .field("authenticated", &self.credentials.is_authenticated())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Resolve an API path against the configured groups host
fn endpoint(config: &ClientConfig, path: &str) -> Result<Url> {
    let base = config.groups_api_url.trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

/// `GET /v1/groups/{id}`; the API answers 400 for unknown groups
async fn fetch_group(
    executor: &dyn RequestExecutor,
    config: &ClientConfig,
    group_id: GroupId,
) -> Result<Group> {
    let url = endpoint(config, &format!("v1/groups/{group_id}"))?;
    let response = executor.execute(ApiRequest::get(url).with_session()).await?;

    match response.status {
        400 | 404 => Err(Error::not_found(format!("group {group_id}"))),
        _ if !response.is_success() => Err(status_error(response.status, &response.body)),
        _ => response.json(),
    }
}
