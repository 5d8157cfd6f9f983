//! Project routes (nested under an organization slug).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
};
use uuid::Uuid;

use atrium_auth::{Action, Subject, SubjectKind};
use atrium_core::ProjectId;

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_project).get(list_projects))
        .route("/:project_id", delete(delete_project))
}

pub async fn create_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(slug): Path<String>,
    Json(body): Json<dto::CreateProjectRequest>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    // Type-level check: may this role ever create a project here?
    if let Err(response) = authz::ensure_allowed(
        &scope.ability,
        Action::Create,
        &Subject::from(SubjectKind::Project),
        "create a new project",
    ) {
        return response;
    }

    let project = match services.store.create_project(
        scope.org.id,
        caller.user_id(),
        &body.name,
        &body.description,
    ) {
        Ok(project) => project,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "projectId": project.id })),
    )
        .into_response()
}

pub async fn list_projects(
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
        &Subject::from(SubjectKind::Project),
        "see the projects of this organization",
    ) {
        return response;
    }

    let projects: Vec<_> = services
        .store
        .projects_in(scope.org.id)
        .into_iter()
        .map(|p| dto::ProjectResponse {
            id: p.id,
            name: p.name,
            description: p.description,
            owner_id: p.owner_id,
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "projects": projects })),
    )
        .into_response()
}

pub async fn delete_project(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path((slug, project_id)): Path<(String, Uuid)>,
) -> axum::response::Response {
    let scope = match common::org_scope(&services, &caller, &slug) {
        Ok(scope) => scope,
        Err(response) => return response,
    };

    let project_id = ProjectId::from_uuid(project_id);
    let Some(project) = services.store.project(project_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "project not found");
    };
    if project.organization_id != scope.org.id {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "project not found");
    }

    // Instance-level check: members may only delete projects they own.
    let subject = Subject::project(project.id, project.organization_id, project.owner_id);
    if let Err(response) =
        authz::ensure_allowed(&scope.ability, Action::Delete, &subject, "delete this project")
    {
        return response;
    }

    if let Err(e) = services.store.delete_project(project.id) {
        return errors::domain_error_to_response(e);
    }

    StatusCode::NO_CONTENT.into_response()
}
