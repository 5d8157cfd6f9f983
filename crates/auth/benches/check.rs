use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use atrium_auth::{Action, Permissions, Role, Subject, SubjectKind};
use atrium_core::{OrganizationId, ProjectId, UserId};

fn bench_checks(c: &mut Criterion) {
    let permissions = Permissions::standard();
    let user = UserId::new();
    let ability = permissions.for_user(user, Role::Member);
    let concrete = Subject::project(ProjectId::new(), OrganizationId::new(), user);
    let abstract_subject = Subject::from(SubjectKind::Project);

    c.bench_function("can_concrete_project", |b| {
        b.iter(|| ability.can(black_box(Action::Delete), black_box(&concrete)))
    });

    c.bench_function("can_abstract_project", |b| {
        b.iter(|| ability.can(black_box(Action::Create), black_box(&abstract_subject)))
    });

    c.bench_function("resolve_ability", |b| {
        b.iter(|| permissions.for_user(black_box(user), black_box(Role::Admin)))
    });
}

criterion_group!(benches, bench_checks);
criterion_main!(benches);
