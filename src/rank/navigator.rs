//! Index arithmetic over a rank-ordered role list

use crate::error::{Error, Result};
use crate::group::Role;
use crate::types::RoleId;
use serde::Serialize;

/// Reserved rank that can never be assigned through rank navigation
pub const SENTINEL_RANK: u8 = 255;

/// Outcome of a successful rank change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankChange {
    /// Role the member held before the change
    pub from: Role,
    /// Role the member holds now
    pub to: Role,
}

/// Sort roles ascending by rank
///
/// The API does not guarantee order, so every list goes through here before
/// any index arithmetic.
pub fn sort_roles(roles: &mut [Role]) {
    roles.sort_by_key(|role| role.rank);
}

/// Position of `role_id` in `roles`, or -1 when it is not listed
pub fn locate_role(roles: &[Role], role_id: RoleId) -> i64 {
    roles
        .iter()
        .position(|role| role.id == role_id)
        .map_or(-1, |index| index as i64)
}

/// Role reached by moving `delta` steps from `current` in the sorted `roles`
///
/// A `current` role missing from the list starts from index -1. Fails with
/// `RankNotFound` when the target index is outside the list or lands on the
/// sentinel rank.
pub fn navigate<'a>(roles: &'a [Role], current: &Role, delta: i64) -> Result<&'a Role> {
    let index = locate_role(roles, current.id).saturating_add(delta);

    let target = usize::try_from(index)
        .ok()
        .and_then(|i| roles.get(i))
        .ok_or(Error::RankNotFound { index })?;

    if target.rank == SENTINEL_RANK {
        return Err(Error::RankNotFound { index });
    }

    Ok(target)
}
