//! Attribute-scoped predicates over concrete subjects.
//!
//! Conditions narrow a rule to specific instances, primarily by ownership
//! ("owner may delete own project") and tenancy ("subject belongs to the
//! caller's organization"). They compose with [`Condition::All`],
//! [`Condition::AnyOf`] and [`Condition::Not`], which is enough to express
//! rules like "owner OR admin-of-same-org may update".

use thiserror::Error;

use atrium_core::{OrganizationId, UserId};

use crate::subject::{Subject, SubjectKind};

/// Who is asking, and (when the ability was resolved from a membership) which
/// organization they are acting in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CheckContext {
    pub user_id: UserId,
    pub organization_id: Option<OrganizationId>,
}

/// A matched condition could not be evaluated against the supplied subject.
///
/// This indicates a caller bug (wrong data shape), so it is surfaced
/// immediately rather than silently treated as a deny; a masked
/// authorization bug would read as a correct denial.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedSubjectError {
    /// The subject instance lacks an attribute the condition requires.
    #[error("subject '{kind}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        kind: SubjectKind,
        attribute: &'static str,
    },

    /// A condition was evaluated against a bare type tag.
    #[error("subject '{0}' is a type tag, a concrete instance is required")]
    NotAnInstance(SubjectKind),

    /// A tenancy condition matched but the ability has no bound organization.
    #[error("ability has no bound organization but a tenancy condition matched")]
    NoCallerOrganization,
}

/// Pure predicate over `(caller, subject instance)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// The subject's owner is the caller. For user subjects the profile's own
    /// id is the owner.
    OwnedByCaller,
    /// The subject belongs to the caller's active organization. For
    /// organization subjects the organization itself is compared.
    InCallerOrganization,
    /// Negation.
    Not(Box<Condition>),
    /// Conjunction; vacuously true when empty.
    All(Vec<Condition>),
    /// Disjunction; vacuously false when empty.
    AnyOf(Vec<Condition>),
}

impl Condition {
    /// Negate a condition.
    pub fn not(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Evaluate against a concrete subject instance.
    ///
    /// Pure and total for well-formed subjects: every failure mode is a
    /// caller bug, never a transient error.
    pub fn evaluate(
        &self,
        ctx: &CheckContext,
        subject: &Subject,
    ) -> Result<bool, MalformedSubjectError> {
        match self {
            Condition::OwnedByCaller => Ok(subject_owner(subject)? == ctx.user_id),
            Condition::InCallerOrganization => {
                let caller_org = ctx
                    .organization_id
                    .ok_or(MalformedSubjectError::NoCallerOrganization)?;
                Ok(subject_organization(subject)? == caller_org)
            }
            Condition::Not(inner) => Ok(!inner.evaluate(ctx, subject)?),
            Condition::All(inner) => {
                for condition in inner {
                    if !condition.evaluate(ctx, subject)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::AnyOf(inner) => {
                for condition in inner {
                    if condition.evaluate(ctx, subject)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

fn subject_owner(subject: &Subject) -> Result<UserId, MalformedSubjectError> {
    let missing = |attribute| MalformedSubjectError::MissingAttribute {
        kind: subject.kind(),
        attribute,
    };

    match subject {
        Subject::Kind(kind) => Err(MalformedSubjectError::NotAnInstance(*kind)),
        Subject::User(attrs) => Ok(attrs.id),
        Subject::Organization(attrs) => attrs.owner_id.ok_or_else(|| missing("owner_id")),
        Subject::Project(attrs) => attrs.owner_id.ok_or_else(|| missing("owner_id")),
        Subject::Invite(_) | Subject::Billing(_) => Err(missing("owner_id")),
    }
}

fn subject_organization(subject: &Subject) -> Result<OrganizationId, MalformedSubjectError> {
    let missing = |attribute| MalformedSubjectError::MissingAttribute {
        kind: subject.kind(),
        attribute,
    };

    match subject {
        Subject::Kind(kind) => Err(MalformedSubjectError::NotAnInstance(*kind)),
        Subject::Organization(attrs) => Ok(attrs.id),
        Subject::Project(attrs) => attrs.organization_id.ok_or_else(|| missing("organization_id")),
        Subject::Invite(attrs) => attrs.organization_id.ok_or_else(|| missing("organization_id")),
        Subject::Billing(attrs) => attrs.organization_id.ok_or_else(|| missing("organization_id")),
        Subject::User(_) => Err(missing("organization_id")),
    }
}
