//! API-side authorization guard.
//!
//! Enforces the decision at the route boundary: one facade call per request,
//! before the store is touched. The core stays transport-agnostic; turning a
//! denial into an HTTP response happens here.

use axum::http::StatusCode;

use atrium_auth::{Ability, Action, Subject};

use crate::app::errors;

/// Reject the request unless `ability` permits `action` on `subject`.
///
/// Denial maps to 403 with a human-readable message; a malformed subject is a
/// bug in this layer (wrong data shape handed to the core) and maps to 500 so
/// it is never mistaken for an authorization decision.
pub fn ensure_allowed(
    ability: &Ability,
    action: Action,
    subject: &Subject,
    what: &str,
) -> Result<(), axum::response::Response> {
    match ability.cannot(action, subject) {
        Ok(false) => Ok(()),
        Ok(true) => Err(errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            format!("You're not allowed to {what}."),
        )),
        Err(e) => {
            tracing::error!(error = %e, "malformed subject handed to authorization core");
            Err(errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "malformed_subject",
                e.to_string(),
            ))
        }
    }
}
