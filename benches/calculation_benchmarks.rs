//! Performance benchmarks for the payroll engine.
//!
//! Covers:
//! - One payroll calculation through the HTTP API
//! - One payroll calculation through the pipeline directly
//! - Annual tax evaluation across the bracket table
//! - Period recomputation for 100 and 1000 employees
//! - Scaling of period recomputation with headcount
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{PayrollPipeline, TaxEngine, calculate_period};
use payroll_engine::config::{ConfigLoader, ConfigStore, PayrollConfig};
use payroll_engine::models::{PayrollInput, PayrollPeriod};
use payroll_engine::repository::InMemoryPayrollStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const PERIOD_ID: u64 = 202401;
const STATUS_CODES: [&str; 6] = ["C0", "C3", "C6", "M0", "M4", "M9"];

fn load_config() -> PayrollConfig {
    ConfigLoader::load("./config/mali")
        .expect("Failed to load config")
        .into_config()
}

/// Builds an input whose salary, status and attendance vary with `i`.
fn create_input(i: usize) -> PayrollInput {
    let days_absent = (i % 4) as u32;
    PayrollInput {
        status_code: STATUS_CODES[i % STATUS_CODES.len()].to_string(),
        days_worked: 26 - days_absent,
        days_absent,
        risk_allowance: if i % 5 == 0 {
            Decimal::from(20_000)
        } else {
            Decimal::ZERO
        },
        loan_deduction: Decimal::from((i % 3) as i64 * 5_000),
        ..PayrollInput::new(
            format!("EMP-{:05}", i),
            Decimal::from(150_000 + (i % 50) as i64 * 10_000),
        )
    }
}

/// Creates a store with one open period and `headcount` enrolled employees.
fn create_store(headcount: usize) -> InMemoryPayrollStore {
    let store = InMemoryPayrollStore::new();
    store
        .add_period(PayrollPeriod::new(
            PERIOD_ID,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        ))
        .unwrap();
    for i in 0..headcount {
        store.enroll(PERIOD_ID, create_input(i)).unwrap();
    }
    store
}

/// Benchmark: One calculation through the router.
fn bench_single_calculation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(
        ConfigStore::new(load_config()),
        Arc::new(InMemoryPayrollStore::new()),
    );
    let router = create_router(state);
    let body = serde_json::json!({
        "input": {
            "employee_id": "EMP-BENCH",
            "base_salary": "500000",
            "status_code": "M2",
            "days_worked": 24,
            "days_absent": 2,
            "housing_allowance": "40000"
        }
    })
    .to_string();

    c.bench_function("single_calculation_http", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: One calculation straight through the pipeline.
fn bench_pipeline(c: &mut Criterion) {
    let config = load_config();
    let input = create_input(7);

    c.bench_function("pipeline_calculate", |b| {
        b.iter(|| black_box(PayrollPipeline::new(&config).calculate(black_box(&input))))
    });

    c.bench_function("pipeline_calculate_with_trace", |b| {
        b.iter(|| black_box(PayrollPipeline::new(&config).calculate_with_trace(black_box(&input))))
    });
}

/// Benchmark: Annual tax at an income in each bracket.
fn bench_annual_tax(c: &mut Criterion) {
    let config = load_config();
    let engine = TaxEngine::new(config.tax_schedule());
    let incomes: Vec<Decimal> = [200_000, 450_000, 900_000, 1_500_000, 2_000_000, 3_000_000, 6_780_000]
        .into_iter()
        .map(Decimal::from)
        .collect();

    let mut group = c.benchmark_group("annual_tax");
    group.throughput(Throughput::Elements(incomes.len() as u64));

    group.bench_function("bracket_walk", |b| {
        b.iter(|| {
            for income in &incomes {
                black_box(engine.calculate_annual_tax(black_box(*income)));
            }
        })
    });
    group.bench_function("cumulative_lookup", |b| {
        b.iter(|| {
            for income in &incomes {
                black_box(engine.annual_tax_from_cumulative(black_box(*income)));
            }
        })
    });

    group.finish();
}

/// Benchmark: Recomputing a 100-employee period.
fn bench_period_100(c: &mut Criterion) {
    let config = load_config();
    let store = create_store(100);

    let mut group = c.benchmark_group("period_recompute");
    group.throughput(Throughput::Elements(100));

    group.bench_function("period_100", |b| {
        b.iter(|| black_box(calculate_period(&config, &store, PERIOD_ID).unwrap()))
    });

    group.finish();
}

/// Benchmark: Recomputing a 1000-employee period.
fn bench_period_1000(c: &mut Criterion) {
    let config = load_config();
    let store = create_store(1000);

    let mut group = c.benchmark_group("large_period_recompute");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("period_1000", |b| {
        b.iter(|| black_box(calculate_period(&config, &store, PERIOD_ID).unwrap()))
    });

    group.finish();
}

/// Benchmark: Period recomputation across headcounts.
fn bench_scaling(c: &mut Criterion) {
    let config = load_config();

    let mut group = c.benchmark_group("scaling");

    for headcount in [1, 10, 50, 200, 500].iter() {
        let store = create_store(*headcount);

        group.throughput(Throughput::Elements(*headcount as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", headcount),
            headcount,
            |b, _| b.iter(|| black_box(calculate_period(&config, &store, PERIOD_ID).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_calculation,
    bench_pipeline,
    bench_annual_tax,
    bench_period_100,
    bench_period_1000,
    bench_scaling,
);
criterion_main!(benches);
