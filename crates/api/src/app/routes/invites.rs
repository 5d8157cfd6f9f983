//! Invite routes: create/list within an organization, accept as the invited
//! user.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use uuid::Uuid;

use atrium_auth::{Action, Role, Subject, SubjectKind};
use atrium_core::InviteId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new().route("/", post(create_invite).get(list_invites))
}

pub async fn create_invite(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
    Json(body): Json<dto::CreateInviteRequest>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::Invite,
        &Subject::from(SubjectKind::User),
        "invite someone to this organization",
    ) {
        return response;
    }

    let role: Role = match body.role.parse() {
        Ok(role) => role,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e.to_string());
        }
    };

    let invite = match services
        .store
        .create_invite(scope.org.id, caller.user_id(), &body.email, role)
    {
        Ok(invite) => invite,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "inviteId": invite.id })),
    )
        .into_response()
}

pub async fn list_invites(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::Read,
        &Subject::from(SubjectKind::Invite),
        "see the invites of this organization",
    ) {
        return response;
    }

    let invites: Vec<_> = services
        .store
        .invites_in(scope.org.id)
        .into_iter()
        .map(|i| dto::InviteResponse {
            id: i.id,
            email: i.email,
            role: i.role,
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "invites": invites })),
    )
        .into_response()
}

/// POST /invites/:invite_id/accept: the invited user joins the organization
/// with the invited role. Authorization here is identity-based (the invite
/// is addressed to an email), not ability-based.
pub async fn accept_invite(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(invite_id): Path<Uuid>,
) -> axum::response::Response {
    let Some(user) = services.store.user(caller.user_id()) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    };

    if let Err(e) = services
        .store
        .accept_invite(InviteId::from_uuid(invite_id), &user)
    {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
