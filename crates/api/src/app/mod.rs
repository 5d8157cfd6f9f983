//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: shared state (store + permission facade)
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(jwt_secret: String) -> Router {
    let keys = Arc::new(middleware::JwtKeys::from_secret(jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState { keys };

    let services = Arc::new(services::build_services());

    // Protected routes: require a verified bearer token.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state.clone(),
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::sessions::public_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(auth_state)),
        )
}
