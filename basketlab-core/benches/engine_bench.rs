//! Criterion benchmarks for kernel hot paths.
//!
//! 1. Indicator precompute over a multi-year series
//! 2. Codec encode/decode round-trip
//! 3. Full simulation over a multi-symbol batch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use basketlab_core::codec::encode;
use basketlab_core::data::{align, MarketDataProvider, SyntheticProvider};
use basketlab_core::domain::SeriesBatch;
use basketlab_core::engine::{run, IndicatorSet, StrategyParams};
use chrono::NaiveDate;

fn make_batch(symbols: usize) -> SeriesBatch {
    let provider = SyntheticProvider::new(17);
    let start = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();

    let series: Vec<_> = (0..symbols)
        .map(|k| provider.fetch(&format!("SYM{k}"), start, end).unwrap())
        .collect();
    align::intersect(series).unwrap()
}

fn bench_indicator_precompute(c: &mut Criterion) {
    let batch = make_batch(1);
    let series = &batch.series()[0];

    c.bench_function("indicator_precompute_4y_daily", |b| {
        b.iter(|| IndicatorSet::compute(black_box(series)))
    });
}

fn bench_codec_roundtrip(c: &mut Criterion) {
    let batch = make_batch(8);
    let series = batch.series().to_vec();

    c.bench_function("codec_roundtrip_8_symbols", |b| {
        b.iter(|| {
            let encoded = encode(black_box(&series));
            black_box(encoded.decode().unwrap())
        })
    });
}

fn bench_simulation(c: &mut Criterion) {
    let params = StrategyParams::default();
    let mut group = c.benchmark_group("simulation_4y_daily");

    for symbols in [1usize, 4, 16] {
        let batch = make_batch(symbols);
        group.bench_with_input(
            BenchmarkId::from_parameter(symbols),
            &batch,
            |b, batch| b.iter(|| run(black_box(batch), &params, 100_000.0)),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_indicator_precompute,
    bench_codec_roundtrip,
    bench_simulation
);
criterion_main!(benches);
