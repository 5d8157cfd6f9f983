use axum::{
    Router,
    routing::{get, post},
};

pub mod billing;
pub mod common;
pub mod invites;
pub mod orgs;
pub mod projects;
pub mod sessions;
pub mod system;

/// Routes that sit behind the bearer-token middleware.
pub fn protected_router() -> Router {
    Router::new()
        .route("/profile", get(sessions::get_profile))
        .route("/invites/:invite_id/accept", post(invites::accept_invite))
        .nest("/organizations", orgs::router())
}
