//! Declarative rule table: per role, which (action, subject) pairs are allowed
//! or denied, optionally guarded by a condition.
//!
//! The table is data, not control flow: adding a role or a grant is a table
//! edit. It is constructed once at process start, read-only afterwards, and
//! shared by reference across concurrent evaluations.

use std::collections::HashMap;

use serde::Serialize;

use crate::action::Action;
use crate::condition::Condition;
use crate::role::Role;
use crate::subject::SubjectKind;

/// Whether a matching rule grants or revokes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Allow,
    Deny,
}

/// Action pattern of a rule. `Any` is the typed "manage" wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSelector {
    Any,
    OneOf(Vec<Action>),
}

impl ActionSelector {
    pub fn matches(&self, action: Action) -> bool {
        match self {
            ActionSelector::Any => true,
            ActionSelector::OneOf(actions) => actions.contains(&action),
        }
    }
}

impl From<Action> for ActionSelector {
    fn from(action: Action) -> Self {
        ActionSelector::OneOf(vec![action])
    }
}

impl<const N: usize> From<[Action; N]> for ActionSelector {
    fn from(actions: [Action; N]) -> Self {
        ActionSelector::OneOf(actions.to_vec())
    }
}

/// Subject pattern of a rule. `Any` is the typed "all" wildcard.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubjectSelector {
    Any,
    Kind(SubjectKind),
}

impl SubjectSelector {
    pub fn matches(&self, kind: SubjectKind) -> bool {
        match self {
            SubjectSelector::Any => true,
            SubjectSelector::Kind(own) => *own == kind,
        }
    }
}

impl From<SubjectKind> for SubjectSelector {
    fn from(kind: SubjectKind) -> Self {
        SubjectSelector::Kind(kind)
    }
}

/// One grant or revocation over (actions, subjects), optionally conditioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub effect: Effect,
    pub actions: ActionSelector,
    pub subject: SubjectSelector,
    pub condition: Option<Condition>,
}

impl Rule {
    pub fn allow(actions: impl Into<ActionSelector>, subject: impl Into<SubjectSelector>) -> Self {
        Self {
            effect: Effect::Allow,
            actions: actions.into(),
            subject: subject.into(),
            condition: None,
        }
    }

    pub fn deny(actions: impl Into<ActionSelector>, subject: impl Into<SubjectSelector>) -> Self {
        Self {
            effect: Effect::Deny,
            actions: actions.into(),
            subject: subject.into(),
            condition: None,
        }
    }

    /// Narrow the rule to instances satisfying `condition`.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether the rule's action/subject patterns cover a query. Conditions
    /// are evaluated separately, against concrete instances only.
    pub fn applies_to(&self, action: Action, kind: SubjectKind) -> bool {
        self.actions.matches(action) && self.subject.matches(kind)
    }
}

/// Static `Role -> rules` mapping plus a baseline applied to every role.
///
/// Ordering is for readability only: the deny-wins invariant is enforced at
/// evaluation time, not by rule position.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    baseline: Vec<Rule>,
    by_role: HashMap<Role, Vec<Rule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule that applies to every role regardless of assignment.
    pub fn baseline(mut self, rule: Rule) -> Self {
        self.baseline.push(rule);
        self
    }

    /// Add a rule to one role's set.
    pub fn grant(mut self, role: Role, rule: Rule) -> Self {
        self.by_role.entry(role).or_default().push(rule);
        self
    }

    /// Rules evaluated for `role`: baseline first, then the role's own rules.
    ///
    /// A role with no entry yields the baseline only; with an empty table,
    /// every check default-denies.
    pub fn resolve(&self, role: Role) -> Vec<Rule> {
        let role_rules = self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[]);
        let mut rules = Vec::with_capacity(self.baseline.len() + role_rules.len());
        rules.extend_from_slice(&self.baseline);
        rules.extend_from_slice(role_rules);
        rules
    }

    /// The product policy.
    ///
    /// Transcription notes:
    /// - admins hold the blanket grant, but updating or handing over an
    ///   organization is reserved to its owner. Since an explicit deny can
    ///   never be overridden, the reservation is a single conditioned deny
    ///   rather than a deny/allow pair relying on declaration order.
    /// - billing seats see nothing outside the billing subject.
    pub fn standard() -> Self {
        RuleTable::new()
            // every role may read the caller's own profile
            .baseline(
                Rule::allow(Action::Read, SubjectKind::User).when(Condition::OwnedByCaller),
            )
            .grant(Role::Admin, Rule::allow(ActionSelector::Any, SubjectSelector::Any))
            .grant(
                Role::Admin,
                Rule::deny(
                    [Action::Update, Action::TransferOwnership],
                    SubjectKind::Organization,
                )
                .when(Condition::not(Condition::OwnedByCaller)),
            )
            .grant(Role::Member, Rule::allow(Action::Read, SubjectKind::Organization))
            .grant(
                Role::Member,
                Rule::allow([Action::Create, Action::Read], SubjectKind::Project),
            )
            .grant(
                Role::Member,
                Rule::allow([Action::Update, Action::Delete], SubjectKind::Project)
                    .when(Condition::OwnedByCaller),
            )
            .grant(
                Role::Billing,
                Rule::allow(ActionSelector::Any, SubjectKind::Billing),
            )
    }
}
