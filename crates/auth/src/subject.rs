//! Typed subject model.
//!
//! Subjects are a closed tagged union rather than duck-typed strings: each
//! concrete variant carries the attributes conditions may consult, so an
//! ill-shaped check is caught by the compiler or surfaced as
//! [`crate::MalformedSubjectError`] instead of silently denying.

use serde::{Deserialize, Serialize};

use atrium_core::{InviteId, OrganizationId, ProjectId, UserId};

/// Resource class an action targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    User,
    Organization,
    Project,
    Invite,
    Billing,
}

impl SubjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::User => "user",
            SubjectKind::Organization => "organization",
            SubjectKind::Project => "project",
            SubjectKind::Invite => "invite",
            SubjectKind::Billing => "billing",
        }
    }
}

impl core::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes of a concrete user subject. A user owns their own profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UserAttrs {
    pub id: UserId,
}

/// Attributes of a concrete organization subject.
///
/// `owner_id` is optional so a partially-loaded instance is representable;
/// a condition that needs it while it is absent is a caller bug, not a deny.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrganizationAttrs {
    pub id: OrganizationId,
    pub owner_id: Option<UserId>,
}

/// Attributes of a concrete project subject.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProjectAttrs {
    pub id: ProjectId,
    pub organization_id: Option<OrganizationId>,
    pub owner_id: Option<UserId>,
}

/// Attributes of a concrete invite subject.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InviteAttrs {
    pub id: InviteId,
    pub organization_id: Option<OrganizationId>,
}

/// Attributes of a concrete billing subject (billing is organization-scoped).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BillingAttrs {
    pub organization_id: Option<OrganizationId>,
}

/// Target of a permission query.
///
/// Either a bare subject kind (type-level check: "can this role ever create a
/// project") or a concrete instance (attribute-aware check: "can this user
/// delete *this* project").
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Subject {
    Kind(SubjectKind),
    User(UserAttrs),
    Organization(OrganizationAttrs),
    Project(ProjectAttrs),
    Invite(InviteAttrs),
    Billing(BillingAttrs),
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Subject::Kind(kind) => *kind,
            Subject::User(_) => SubjectKind::User,
            Subject::Organization(_) => SubjectKind::Organization,
            Subject::Project(_) => SubjectKind::Project,
            Subject::Invite(_) => SubjectKind::Invite,
            Subject::Billing(_) => SubjectKind::Billing,
        }
    }

    /// Whether this is a concrete instance (conditions apply) rather than a
    /// type-level tag.
    pub fn is_instance(&self) -> bool {
        !matches!(self, Subject::Kind(_))
    }

    /// Concrete organization subject.
    pub fn organization(id: OrganizationId, owner_id: UserId) -> Self {
        Subject::Organization(OrganizationAttrs {
            id,
            owner_id: Some(owner_id),
        })
    }

    /// Concrete project subject.
    pub fn project(id: ProjectId, organization_id: OrganizationId, owner_id: UserId) -> Self {
        Subject::Project(ProjectAttrs {
            id,
            organization_id: Some(organization_id),
            owner_id: Some(owner_id),
        })
    }

    /// Concrete user (profile) subject.
    pub fn user(id: UserId) -> Self {
        Subject::User(UserAttrs { id })
    }
}

impl From<SubjectKind> for Subject {
    fn from(kind: SubjectKind) -> Self {
        Subject::Kind(kind)
    }
}
