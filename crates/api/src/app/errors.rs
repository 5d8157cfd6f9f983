use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use atrium_core::DomainError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Map store/domain failures onto the corrected status taxonomy: 400 for
/// validation, 409 for conflicts, 404 for absent resources, 403 for
/// authorization failures surfaced by the domain layer.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized"),
    }
}

pub fn not_a_member() -> axum::response::Response {
    json_error(
        StatusCode::FORBIDDEN,
        "not_a_member",
        "You're not a member of this organization.",
    )
}

pub fn organization_not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "organization not found")
}
