//! Permission facade: the single entry point used by route handlers.
//!
//! A handler resolves the caller's role and the target resource, asks
//! [`Permissions`] for an [`Ability`], and calls `can`/`cannot` once per
//! request. The ability is an immutable resolved rule-set snapshot: a pure
//! function of `(user, role, table)` with no hidden state, safe to evaluate
//! concurrently without coordination.

use std::sync::Arc;

use atrium_core::{OrganizationId, UserId};

use crate::action::Action;
use crate::condition::{CheckContext, MalformedSubjectError};
use crate::role::Role;
use crate::rules::{Effect, Rule, RuleTable};
use crate::subject::Subject;

/// Facade over a shared, read-only rule table.
///
/// Constructed once at startup and passed by reference into request handling;
/// there is no mutable global.
#[derive(Debug, Clone)]
pub struct Permissions {
    table: Arc<RuleTable>,
}

impl Permissions {
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// Facade over the standard product policy.
    pub fn standard() -> Self {
        Self::new(Arc::new(RuleTable::standard()))
    }

    /// Resolve an ability for a caller outside any organization context.
    ///
    /// Tenancy conditions cannot evaluate on such an ability; the standard
    /// table never requires them, custom tables that do should use
    /// [`Permissions::for_member`].
    pub fn for_user(&self, user_id: UserId, role: Role) -> Ability {
        self.resolve(user_id, role, None)
    }

    /// Resolve an ability for a caller acting within the organization that
    /// granted `role`.
    pub fn for_member(
        &self,
        user_id: UserId,
        role: Role,
        organization_id: OrganizationId,
    ) -> Ability {
        self.resolve(user_id, role, Some(organization_id))
    }

    fn resolve(
        &self,
        user_id: UserId,
        role: Role,
        organization_id: Option<OrganizationId>,
    ) -> Ability {
        Ability {
            ctx: CheckContext {
                user_id,
                organization_id,
            },
            role,
            rules: self.table.resolve(role),
        }
    }
}

/// Resolved, per-caller decision object. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Ability {
    ctx: CheckContext,
    role: Role,
    rules: Vec<Rule>,
}

impl Ability {
    pub fn user_id(&self) -> UserId {
        self.ctx.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether `action` on `subject` is permitted.
    ///
    /// Evaluates every matching rule; an explicit deny wins over any allow,
    /// and anything not explicitly allowed is denied. The only short-circuit
    /// is stopping on a matched deny, since no later allow can override it.
    ///
    /// Denial is a normal `Ok(false)`. The error path is reserved for caller
    /// bugs: a matched condition requiring an attribute the supplied instance
    /// does not carry.
    pub fn can(&self, action: Action, subject: &Subject) -> Result<bool, MalformedSubjectError> {
        let mut allowed = false;

        for rule in &self.rules {
            if !rule.applies_to(action, subject.kind()) {
                continue;
            }

            let satisfied = match &rule.condition {
                None => true,
                // Type-level query: a conditioned allow could hold for some
                // instance, a conditioned deny cannot be proven for the class.
                Some(_) if !subject.is_instance() => rule.effect == Effect::Allow,
                Some(condition) => condition.evaluate(&self.ctx, subject)?,
            };

            if !satisfied {
                continue;
            }

            match rule.effect {
                Effect::Deny => return Ok(false),
                Effect::Allow => allowed = true,
            }
        }

        Ok(allowed)
    }

    /// Logical negation of [`Ability::can`].
    pub fn cannot(&self, action: Action, subject: &Subject) -> Result<bool, MalformedSubjectError> {
        self.can(action, subject).map(|allowed| !allowed)
    }
}
