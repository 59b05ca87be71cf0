//! Validator performance benchmarks.
//!
//! Measures parsing and validation on weekly datasets of increasing length.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cadence::{DataValidator, Parser};

/// Build a weekly CSV with `rows` rows and three spend channels.
fn weekly_csv(rows: usize) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2015, 1, 5).unwrap();
    let mut out = String::from("date,revenue,spend_meta,spend_google,tv_S\n");
    for i in 0..rows {
        let d = start + chrono::Duration::days(7 * i as i64);
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            d.format("%Y-%m-%d"),
            10_000 + i * 13,
            i % 17,
            i % 11,
            i % 5
        ));
    }
    out
}

/// Benchmark CSV parsing.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = Parser::new();

    for rows in [52, 260, 1040].iter() {
        let csv = weekly_csv(*rows);
        group.bench_with_input(BenchmarkId::new("weekly", rows), &csv, |b, csv| {
            b.iter(|| black_box(parser.parse_bytes(csv.as_bytes())))
        });
    }

    group.finish();
}

/// Benchmark the full validation pipeline.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let parser = Parser::new();

    for rows in [52, 260, 1040].iter() {
        let dataset = parser
            .parse_bytes(weekly_csv(*rows).as_bytes())
            .expect("benchmark csv parses");

        group.bench_with_input(BenchmarkId::new("weekly", rows), &dataset, |b, dataset| {
            b.iter(|| {
                let mut ds = dataset.clone();
                black_box(DataValidator::new(&mut ds).validate())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
