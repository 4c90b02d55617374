use criterion::{black_box, criterion_group, criterion_main, Criterion};

use models::{MicroAuth, MicroUser};
use service::users::join_by_username;

fn bench_join(c: &mut Criterion) {
    let users: Vec<MicroUser> = (0..1_000)
        .map(|i| MicroUser { id: Some(i), username: format!("user{i}") })
        .collect();
    // every tenth user has no auth record
    let auths: Vec<MicroAuth> = (0..1_000)
        .filter(|i| i % 10 != 0)
        .rev()
        .map(|i| MicroAuth { id: Some(10_000 + i), username: format!("user{i}"), password: "h".into(), role: "CLIENT".into() })
        .collect();

    c.bench_function("join_by_username_1000", |b| {
        b.iter(|| join_by_username(black_box(users.clone()), black_box(&auths)));
    });
}

criterion_group!(benches, bench_join);
criterion_main!(benches);
