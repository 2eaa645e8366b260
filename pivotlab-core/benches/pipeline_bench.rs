//! Criterion benchmarks for PivotLab hot paths.
//!
//! Benchmarks:
//! 1. Indicator precompute (RSI, ATR, AMA)
//! 2. Pivot detection
//! 3. Trendline build from precomputed pivots and ATR
//! 4. Full pipeline (enrich + summary)
//! 5. Fingerprint of a finished analysis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pivotlab_core::analyze;
use pivotlab_core::domain::Bar;
use pivotlab_core::fingerprint::fingerprint;
use pivotlab_core::indicators::{Ama, Atr, Indicator, Rsi};
use pivotlab_core::params::{
    AMA_FAST_FACTOR, AMA_SLOW_FACTOR, AMA_WINDOW, ATR_PERIOD, PIVOT_LENGTH, RSI_PERIOD,
};
use pivotlab_core::pivots::PivotDetector;
use pivotlab_core::synthetic::{default_start, generate_bars};
use pivotlab_core::trendline::TrendlineEngine;

// ── Fixtures ─────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    generate_bars("BENCH", n, default_start())
}

// ── 1. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");
    let bars = make_bars(1260);

    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(Rsi::new(RSI_PERIOD)),
        Box::new(Atr::new(ATR_PERIOD)),
        Box::new(Ama::new(AMA_WINDOW, AMA_FAST_FACTOR, AMA_SLOW_FACTOR)),
    ];

    for ind in &indicators {
        group.bench_with_input(BenchmarkId::new(ind.name(), 1260), &bars, |b, bars| {
            b.iter(|| ind.compute(black_box(bars)));
        });
    }

    group.finish();
}

// ── 2. Pivots ────────────────────────────────────────────────────────

fn bench_pivots(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivots");
    let detector = PivotDetector::new(PIVOT_LENGTH);

    for &n in &[252usize, 1260, 5040] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::new("detect", n), &bars, |b, bars| {
            b.iter(|| detector.detect(black_box(bars)));
        });
    }

    group.finish();
}

// ── 3. Trendlines ────────────────────────────────────────────────────

fn bench_trendlines(c: &mut Criterion) {
    let mut group = c.benchmark_group("trendlines");
    let bars = make_bars(1260);
    let pivots = PivotDetector::new(PIVOT_LENGTH).detect(&bars);
    let atr = Atr::new(ATR_PERIOD).compute(&bars);
    let engine = TrendlineEngine::new(PIVOT_LENGTH);

    group.bench_function("build_1260_bars", |b| {
        b.iter(|| engine.build(black_box(&bars), black_box(&pivots), black_box(&atr)));
    });

    group.finish();
}

// ── 4. Full pipeline ─────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for &n in &[252usize, 1260, 5040] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::new("analyze", n), &bars, |b, bars| {
            b.iter(|| analyze(black_box(bars)));
        });
    }

    group.finish();
}

// ── 5. Fingerprint ───────────────────────────────────────────────────

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let analysis = analyze(&make_bars(1260));

    group.bench_function("analysis_1260_bars", |b| {
        b.iter(|| fingerprint(black_box(&analysis)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_indicators,
    bench_pivots,
    bench_trendlines,
    bench_pipeline,
    bench_fingerprint,
);
criterion_main!(benches);
