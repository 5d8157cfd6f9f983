use std::sync::Arc;

use atrium_auth::Ability;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::CallerContext;
use crate::store::OrganizationRecord;

/// An organization-scoped request: the target organization and the caller's
/// ability within it, resolved from their membership.
pub struct OrgScope {
    pub org: OrganizationRecord,
    pub ability: Ability,
}

/// Resolve the organization named by `slug` and the caller's membership in
/// it. Absent organization → 404; absent membership → 403.
pub fn org_scope(
    services: &Arc<AppServices>,
    caller: &CallerContext,
    slug: &str,
) -> Result<OrgScope, axum::response::Response> {
    let org = services
        .store
        .organization_by_slug(slug)
        .ok_or_else(errors::organization_not_found)?;

    let membership = services
        .store
        .membership(caller.user_id(), org.id)
        .ok_or_else(errors::not_a_member)?;

    let ability = services
        .permissions
        .for_member(caller.user_id(), membership.role, org.id);

    Ok(OrgScope { org, ability })
}
