//! Performance benchmarks for the pay period engine.
//!
//! Covers the pure resolver path (single period and a full year), yearly
//! trigger planning, and a resolve request through the HTTP router.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use timesheet_engine::api::{AppState, create_router};
use timesheet_engine::calculation::{holidays_for_year, periods_for_year, resolve, resolve_period};
use timesheet_engine::config::ConfigLoader;
use timesheet_engine::schedule::ScheduleOrchestrator;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Benchmark: resolving one holiday-affected period.
fn bench_resolve_single(c: &mut Criterion) {
    c.bench_function("resolve_good_friday_period", |b| {
        b.iter(|| resolve(black_box(2024), black_box(3), black_box(16), black_box(31)))
    });
}

/// Benchmark: resolving all 24 periods of a year, for a few years.
fn bench_resolve_year(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_year");
    group.throughput(Throughput::Elements(24));

    for year in [2024, 2025, 2026] {
        let periods = periods_for_year(year).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(year), &periods, |b, periods| {
            b.iter(|| {
                periods
                    .iter()
                    .map(|p| resolve_period(black_box(p)))
                    .collect::<Vec<_>>()
            })
        });
    }

    group.finish();
}

/// Benchmark: building the holiday table.
fn bench_holidays(c: &mut Criterion) {
    c.bench_function("holidays_for_year", |b| {
        b.iter(|| holidays_for_year(black_box(2025)))
    });
}

/// Benchmark: planning a year of triggers.
fn bench_plan_year(c: &mut Criterion) {
    let orchestrator = ScheduleOrchestrator::new(chrono_tz::America::Vancouver, 8, 9);
    c.bench_function("plan_year", |b| {
        b.iter(|| orchestrator.plan_year(black_box(2025)).unwrap())
    });
}

/// Benchmark: POST /periods/resolve through the router.
fn bench_http_resolve(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::load("./config/bc").expect("Failed to load config");
    let router = create_router(AppState::new(config));
    let body = r#"{"year":2024,"month":10,"start_day":1,"end_day":15}"#;

    c.bench_function("http_resolve", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/periods/resolve")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_single,
    bench_resolve_year,
    bench_holidays,
    bench_plan_year,
    bench_http_resolve
);
criterion_main!(benches);
