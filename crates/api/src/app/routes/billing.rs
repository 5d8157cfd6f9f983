//! Billing routes: per-organization summary and export.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use atrium_auth::{Action, BillingAttrs, Subject};

use crate::app::routes::common::{self, OrgScope};
use crate::app::services::AppServices;
use crate::app::dto;
use crate::authz;
use crate::context::CallerContext;

const SEAT_PRICE_CENTS: u64 = 1000;
const PROJECT_PRICE_CENTS: u64 = 2000;

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_billing))
        .route("/export", get(export_billing))
}

fn billing_subject(scope: &OrgScope) -> Subject {
    Subject::Billing(BillingAttrs {
        organization_id: Some(scope.org.id),
    })
}

fn summary(services: &AppServices, scope: &OrgScope) -> dto::BillingSummaryResponse {
    let seats = services.store.member_count(scope.org.id);
    let projects = services.store.projects_in(scope.org.id).len();

    let seats_line = dto::BillingLine {
        unit: "seat",
        quantity: seats,
        unit_price_cents: SEAT_PRICE_CENTS,
        total_cents: seats as u64 * SEAT_PRICE_CENTS,
    };
    let projects_line = dto::BillingLine {
        unit: "project",
        quantity: projects,
        unit_price_cents: PROJECT_PRICE_CENTS,
        total_cents: projects as u64 * PROJECT_PRICE_CENTS,
    };
    let total_cents = seats_line.total_cents + projects_line.total_cents;

    dto::BillingSummaryResponse {
        seats: seats_line,
        projects: projects_line,
        total_cents,
    }
}

pub async fn get_billing(
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
        &billing_subject(&scope),
        "see the billing of this organization",
    ) {
        return response;
    }

    (StatusCode::OK, Json(summary(&services, &scope))).into_response()
}

pub async fn export_billing(
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
        Action::Export,
        &billing_subject(&scope),
        "export the billing of this organization",
    ) {
        return response;
    }

    let summary = summary(&services, &scope);
    let csv = format!(
        "unit,quantity,unit_price_cents,total_cents\n\
         seat,{},{},{}\n\
         project,{},{},{}\n\
         total,,,{}\n",
        summary.seats.quantity,
        summary.seats.unit_price_cents,
        summary.seats.total_cents,
        summary.projects.quantity,
        summary.projects.unit_price_cents,
        summary.projects.total_cents,
        summary.total_cents,
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        csv,
    )
        .into_response()
}
