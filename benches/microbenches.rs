//! Criterion microbenches for winedata schema validation.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - CSV header extraction (columns_from_csv_slice), which reads every row
//! - Building the per-column report against the wine schema

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use winedata::config::Schema;
use winedata::validation::{columns_from_csv_slice, ColumnReport};

// Include test fixtures at compile time (no file I/O during benchmark)
const WINE_FIXTURE: &str = include_str!("../tests/fixtures/winequality-red.csv");

/// A larger CSV built by repeating the fixture rows.
fn wide_fixture(repeats: usize) -> String {
    let mut lines = WINE_FIXTURE.lines();
    let header = lines.next().unwrap_or_default();
    let rows: Vec<&str> = lines.collect();

    let mut csv = String::from(header);
    csv.push('\n');
    for _ in 0..repeats {
        for row in &rows {
            csv.push_str(row);
            csv.push('\n');
        }
    }
    csv
}

fn wine_schema() -> Schema {
    WINE_FIXTURE
        .lines()
        .next()
        .unwrap_or_default()
        .split(',')
        .map(|name| (name, "float64"))
        .collect()
}

/// Benchmark header extraction over a file with many rows.
fn bench_read_columns(c: &mut Criterion) {
    let csv = wide_fixture(2_000);
    let mut group = c.benchmark_group("read_columns");
    group.throughput(Throughput::Bytes(csv.len() as u64));

    group.bench_function("columns_from_csv_slice", |b| {
        b.iter(|| {
            let columns = columns_from_csv_slice(black_box(csv.as_bytes())).unwrap();
            black_box(columns)
        })
    });

    group.finish();
}

/// Benchmark building the per-column report.
fn bench_column_report(c: &mut Criterion) {
    let columns = columns_from_csv_slice(WINE_FIXTURE.as_bytes()).expect("parse wine fixture");
    let schema = wine_schema();

    let mut group = c.benchmark_group("column_report");
    group.throughput(Throughput::Elements(columns.len() as u64));

    group.bench_function("build", |b| {
        b.iter(|| black_box(ColumnReport::build(black_box(&columns), black_box(&schema))))
    });

    group.finish();
}

criterion_group!(benches, bench_read_columns, bench_column_report);
criterion_main!(benches);
