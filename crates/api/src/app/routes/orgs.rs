//! Organization routes.
//!
//! Every guarded handler follows the same shape: resolve the organization and
//! the caller's membership, resolve an ability, ask `cannot` once, then act.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};

use atrium_auth::{Action, Subject};

use crate::app::routes::{billing, common, invites, projects};
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_organization))
        .route(
            "/:slug",
            get(get_organization)
                .put(update_organization)
                .delete(delete_organization),
        )
        .route("/:slug/owner", patch(transfer_ownership))
        .nest("/:slug/projects", projects::router())
        .nest("/:slug/invites", invites::router())
        .nest("/:slug/billing", billing::router())
}

pub async fn create_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Json(body): Json<dto::CreateOrganizationRequest>,
) -> axum::response::Response {
    // Any authenticated user may found an organization; they become its
    // owner and first admin.
    let org = match services
        .store
        .create_organization(&body.slug, &body.name, caller.user_id())
    {
        Ok(org) => org,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "organizationId": org.id })),
    )
        .into_response()
}

pub async fn get_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    let subject = Subject::organization(scope.org.id, scope.org.owner_id);
    if let Err(response) =
        authz::ensure_allowed(&scope.ability, Action::Read, &subject, "see this organization")
    {
        return response;
    }

    (
        StatusCode::OK,
        Json(dto::OrganizationResponse {
            id: scope.org.id,
            slug: scope.org.slug,
            name: scope.org.name,
            owner_id: scope.org.owner_id,
        }),
    )
        .into_response()
}

pub async fn update_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
    Json(body): Json<dto::UpdateOrganizationRequest>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    let subject = Subject::organization(scope.org.id, scope.org.owner_id);
    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::Update,
        &subject,
        "update this organization",
    ) {
        return response;
    }

    if let Err(e) = services.store.rename_organization(scope.org.id, &body.name) {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}

pub async fn transfer_ownership(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
    Json(body): Json<dto::TransferOwnershipRequest>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    let subject = Subject::organization(scope.org.id, scope.org.owner_id);
    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::TransferOwnership,
        &subject,
        "transfer ownership of this organization",
    ) {
        return response;
    }

    if let Err(e) = services
        .store
        .transfer_organization(scope.org.id, body.new_owner_id)
    {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}

pub async fn delete_organization(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    let subject = Subject::organization(scope.org.id, scope.org.owner_id);
    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::Delete,
        &subject,
        "delete this organization",
    ) {
        return response;
    }

    if let Err(e) = services.store.delete_organization(scope.org.id) {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
