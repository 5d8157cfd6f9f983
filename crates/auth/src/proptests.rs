//! Property tests for the decision laws: determinism, negation, default-deny,
//! and deny-wins under arbitrary rule orderings.

use proptest::prelude::*;
use uuid::Uuid;

use atrium_core::{OrganizationId, ProjectId, UserId};

use crate::{Ability, Action, Permissions, Role, Rule, RuleTable, Subject, SubjectKind};

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Admin), Just(Role::Member), Just(Role::Billing)]
}

fn arb_action() -> impl Strategy<Value = Action> {
    proptest::sample::select(Action::ALL.to_vec())
}

fn arb_user_id() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|raw| UserId::from_uuid(Uuid::from_u128(raw)))
}

/// Subjects that are always well-formed for the standard table.
fn subject_for(pick: usize, owner: UserId) -> Subject {
    match pick {
        0 => Subject::Kind(SubjectKind::User),
        1 => Subject::Kind(SubjectKind::Organization),
        2 => Subject::Kind(SubjectKind::Project),
        3 => Subject::Kind(SubjectKind::Invite),
        4 => Subject::Kind(SubjectKind::Billing),
        5 => Subject::organization(OrganizationId::new(), owner),
        6 => Subject::project(ProjectId::new(), OrganizationId::new(), owner),
        _ => Subject::user(owner),
    }
}

fn ability(user: UserId, role: Role) -> Ability {
    Permissions::standard().for_user(user, role)
}

proptest! {
    #[test]
    fn decisions_are_deterministic(
        user in arb_user_id(),
        role in arb_role(),
        action in arb_action(),
        pick in 0usize..8,
        owner_is_caller in any::<bool>(),
        other in arb_user_id(),
    ) {
        let owner = if owner_is_caller { user } else { other };
        let subject = subject_for(pick, owner);

        let first = ability(user, role).can(action, &subject).unwrap();
        let second = ability(user, role).can(action, &subject).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn cannot_is_the_negation_of_can(
        user in arb_user_id(),
        role in arb_role(),
        action in arb_action(),
        pick in 0usize..8,
        owner_is_caller in any::<bool>(),
        other in arb_user_id(),
    ) {
        let owner = if owner_is_caller { user } else { other };
        let subject = subject_for(pick, owner);

        let checker = ability(user, role);
        let can = checker.can(action, &subject).unwrap();
        prop_assert_eq!(checker.cannot(action, &subject).unwrap(), !can);
    }

    #[test]
    fn empty_table_denies_everything(
        user in arb_user_id(),
        role in arb_role(),
        action in arb_action(),
        pick in 0usize..8,
    ) {
        let permissions = Permissions::new(std::sync::Arc::new(RuleTable::new()));
        let checker = permissions.for_user(user, role);
        let subject = subject_for(pick, user);
        prop_assert!(!checker.can(action, &subject).unwrap());
    }

    #[test]
    fn deny_wins_for_any_interleaving(
        user in arb_user_id(),
        action in arb_action(),
        deny_first in any::<bool>(),
    ) {
        let allow = Rule::allow(action, SubjectKind::Project);
        let deny = Rule::deny(action, SubjectKind::Project);
        let table = if deny_first {
            RuleTable::new()
                .grant(Role::Member, deny)
                .grant(Role::Member, allow)
        } else {
            RuleTable::new()
                .grant(Role::Member, allow)
                .grant(Role::Member, deny)
        };

        let checker = Permissions::new(std::sync::Arc::new(table)).for_user(user, Role::Member);
        prop_assert!(!checker.can(action, &Subject::Kind(SubjectKind::Project)).unwrap());
    }
}
