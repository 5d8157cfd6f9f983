//! Request/response DTOs and JSON mapping helpers.

use serde::{Deserialize, Serialize};

use atrium_auth::Role;
use atrium_core::{InviteId, OrganizationId, ProjectId, UserId};

// ── accounts & sessions ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PasswordSessionRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

// ── organizations ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferOwnershipRequest {
    pub new_owner_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: OrganizationId,
    pub slug: String,
    pub name: String,
    pub owner_id: UserId,
}

// ── projects ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub owner_id: UserId,
}

// ── invites ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub email: String,
    /// Parsed with `Role::from_str`; unknown values are a 400, not a 422.
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub id: InviteId,
    pub email: String,
    pub role: Role,
}

// ── billing ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BillingLine {
    pub unit: &'static str,
    pub quantity: usize,
    pub unit_price_cents: u64,
    pub total_cents: u64,
}

#[derive(Debug, Serialize)]
pub struct BillingSummaryResponse {
    pub seats: BillingLine,
    pub projects: BillingLine,
    pub total_cents: u64,
}
