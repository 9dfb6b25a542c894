//! Criterion benchmarks for detection hot paths.
//!
//! Benchmarks:
//! 1. Classifying a mix of raw values
//! 2. Scanning pages of increasing size
//! 3. Full panel initialization (scan + merge + initial writes)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use slidevars_core::{
    classify, scan, InitOptions, SlideVars, StyleSnapshot, UnitRangeTable, VarConfig, ROOT_SCOPE,
};

// ── Helpers ──────────────────────────────────────────────────────────

const SAMPLE_VALUES: &[&str] = &[
    "#667eea",
    "rgba(0, 0, 0, 0.5)",
    "rebeccapurple",
    "12px",
    "1.4",
    "150ms",
    "0.25rem",
    "auto",
    "var(--other)",
    "0 1px 2px rgba(0,0,0,0.05)",
];

fn make_page(n: usize) -> StyleSnapshot {
    (0..n).fold(StyleSnapshot::new(), |page, i| {
        page.with_root_property(&format!("--var-{i}"), SAMPLE_VALUES[i % SAMPLE_VALUES.len()])
    })
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_classify(c: &mut Criterion) {
    let table = UnitRangeTable::builtin();
    c.bench_function("classify_mixed_values", |b| {
        b.iter(|| {
            for value in SAMPLE_VALUES {
                black_box(classify(black_box(value), table));
            }
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for n in [10, 100, 1000] {
        let page = make_page(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &page, |b, page| {
            b.iter(|| black_box(scan(page, ROOT_SCOPE, None)))
        });
    }
    group.finish();
}

fn bench_init(c: &mut Criterion) {
    c.bench_function("init_100_vars", |b| {
        b.iter_batched(
            || SlideVars::new(make_page(100)),
            |mut vars| {
                vars.init(VarConfig::new(), &InitOptions::default());
                black_box(vars)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_classify, bench_scan, bench_init);
criterion_main!(benches);
