//! # Token Service Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | issue (HS256 sign) | < 50µs |
//! | validate (header peek + HS256 verify) | < 50µs |
//! | has_permission | < 100ns |

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shared_types::{has_permission, AccessTier, Role};
use std::time::Duration;
use wh_01_token_service::{SigningSecret, TokenApi, TokenService, TokenServiceConfig};

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::new(
        SigningSecret::new("benchmark-secret-0123456789abcdef").expect("non-empty secret"),
    ))
}

fn bench_issue(c: &mut Criterion) {
    let service = service();
    let mut group = c.benchmark_group("wh-01-token-service");

    group.bench_function("issue", |b| {
        b.iter(|| {
            service
                .issue(
                    black_box("USR-2024-001"),
                    "operator",
                    Role::WarehouseOperator,
                    AccessTier::Level2,
                    Duration::from_secs(3_600),
                )
                .expect("issue")
        })
    });

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let service = service();
    let token = service
        .issue_with_default_tier(
            "USR-2024-001",
            "operator",
            Role::WarehouseOperator,
            Duration::from_secs(3_600),
        )
        .expect("issue");
    let mut group = c.benchmark_group("wh-01-token-service");

    group.bench_function("validate", |b| {
        b.iter(|| service.validate(black_box(&token)).expect("validate"))
    });

    group.bench_function("validate_rejects_garbage", |b| {
        b.iter(|| service.validate(black_box("not.a.token")).is_err())
    });

    group.bench_function("has_permission", |b| {
        b.iter(|| has_permission(black_box("level_2"), black_box("level_3")))
    });

    group.finish();
}

criterion_group!(benches, bench_issue, bench_validate);
criterion_main!(benches);
