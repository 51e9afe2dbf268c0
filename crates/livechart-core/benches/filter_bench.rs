use livechart_core::filter::remove_wick_outliers;
use livechart_core::series::{Candle, Series};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, black_box};

fn gen_series(n: usize) -> Series {
    let mut v = Vec::with_capacity(n);
    let mut price = 100.0f64;
    for i in 0..n {
        let o = price;
        let c = o + (i as f64 * 0.37).sin() * 0.5;
        let mut upper = 0.2 + (i as f64 * 0.11).cos().abs() * 0.3;
        if i % 997 == 0 { upper *= 50.0; }
        let lower = 0.15 + (i as f64 * 0.07).sin().abs() * 0.25;
        v.push(Candle::new(i as f64 * 60.0, o, o.max(c) + upper, o.min(c) - lower, c));
        price = c;
    }
    Series::from_candles(v)
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("wick_filter");
    for &n in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || gen_series(n),
                |s| {
                    let report = remove_wick_outliers(black_box(&s), 1.5);
                    black_box(report.removed);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
