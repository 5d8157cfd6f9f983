//! Accounts and sessions: registration, password authentication, profile.
//!
//! Authentication failures use 401; validation failures use 400. Ordinary
//! authorization denials never occur here (identity is all that is needed).

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::CallerContext;
use crate::middleware::AuthState;
use crate::store::password_digest;

pub fn public_router() -> Router {
    Router::new()
        .route("/users", post(create_account))
        .route("/sessions/password", post(create_password_session))
}

pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    let user = match services
        .store
        .create_user(&body.name, &body.email, &body.password)
    {
        Ok(user) => user,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "userId": user.id })),
    )
        .into_response()
}

pub async fn create_password_session(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthState>,
    Json(body): Json<dto::PasswordSessionRequest>,
) -> axum::response::Response {
    let Some(user) = services.store.user_by_email(&body.email) else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "bad_credentials", "Invalid credentials.");
    };

    if user.password_digest != password_digest(&body.password) {
        return errors::json_error(StatusCode::UNAUTHORIZED, "bad_credentials", "Invalid credentials.");
    }

    let token = match auth.sign(user.id, Utc::now()) {
        Ok(token) => token,
        Err(status) => return errors::json_error(status, "token_error", "failed to issue token"),
    };

    (StatusCode::CREATED, Json(dto::TokenResponse { token })).into_response()
}

pub async fn get_profile(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
) -> axum::response::Response {
    let Some(user) = services.store.user(caller.user_id()) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found");
    };

    (
        StatusCode::OK,
        Json(dto::ProfileResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        }),
    )
        .into_response()
}
