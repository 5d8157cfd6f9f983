//! `atrium-auth` — pure authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: identity and
//! subject attributes arrive as already-loaded values, decisions flow back as
//! plain booleans. Denial is a normal outcome, never an error.

pub mod ability;
pub mod action;
pub mod claims;
pub mod condition;
pub mod role;
pub mod rules;
pub mod subject;

pub use ability::{Ability, Permissions};
pub use action::Action;
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use condition::{CheckContext, Condition, MalformedSubjectError};
pub use role::{InvalidRoleError, Role};
pub use rules::{ActionSelector, Effect, Rule, RuleTable, SubjectSelector};
pub use subject::{
    BillingAttrs, InviteAttrs, OrganizationAttrs, ProjectAttrs, Subject, SubjectKind, UserAttrs,
};

#[cfg(test)]
mod proptests;
