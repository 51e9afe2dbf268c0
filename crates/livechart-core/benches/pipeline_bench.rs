use livechart_core::catalog::{Instrument, Interval};
use livechart_core::{Config, Pipeline, Selection, SyntheticSource, Trigger};
use criterion::{criterion_group, criterion_main, Criterion, black_box};

const END: i64 = 1_705_017_600;

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let pipeline = Pipeline::new(SyntheticSource::new(END), &Config::default());
    for (symbol, interval) in [("NVDA", Interval::M5), ("BTC-USD", Interval::H1), ("AAPL", Interval::D1)] {
        let selection = Selection::new(Instrument::new(symbol, symbol), interval);
        group.bench_function(format!("{symbol}_{interval}"), |b| {
            b.iter(|| black_box(pipeline.run(&selection, Trigger::TimerTick)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
