// File: crates/livechart-core/tests/indicator.rs
// Purpose: Trailing SMA alignment, values, and omission on short series.

use livechart_core::indicator::{sma_closes, DEFAULT_SMA_WINDOW};
use livechart_core::series::{Candle, Series};
use livechart_core::{Indicator, IndicatorParams, SmaIndicator};
use proptest::prelude::*;

fn closes(values: &[f64]) -> Series {
    values
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle::new(i as f64 * 300.0, c, c + 1.0, c - 1.0, c))
        .collect()
}

#[test]
fn sma_is_omitted_below_window() {
    let series = closes(&[10.0; 19]);
    let sma = SmaIndicator;
    assert!(sma.compute(&series, &IndicatorParams::default()).is_none());
    assert!(sma.compute(&Series::new(), &IndicatorParams::default()).is_none());
}

#[test]
fn sma_exactly_one_window_gives_one_point() {
    let values: Vec<f64> = (1..=20).map(|v| v as f64).collect();
    let pts = SmaIndicator.compute(&closes(&values), &IndicatorParams::default()).expect("sma");
    assert_eq!(pts.len(), 1);
    assert_eq!(pts[0].t, 19.0 * 300.0);
    assert!((pts[0].value - 10.5).abs() < 1e-9);
}

#[test]
fn sma_points_are_tail_aligned_means() {
    let values: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let series = closes(&values);
    let pts = SmaIndicator.compute(&series, &IndicatorParams::default()).expect("sma");
    assert_eq!(pts.len(), 50 - DEFAULT_SMA_WINDOW + 1);

    for (k, p) in pts.iter().enumerate() {
        let end = k + DEFAULT_SMA_WINDOW;
        let mean: f64 = values[k..end].iter().sum::<f64>() / DEFAULT_SMA_WINDOW as f64;
        assert_eq!(p.t, series.candles()[end - 1].t);
        assert!((p.value - mean).abs() < 1e-9, "point {k}: {} vs {mean}", p.value);
    }
}

#[test]
fn sma_name_carries_window() {
    assert_eq!(SmaIndicator.name(&IndicatorParams::default()), "20-SMA");
    assert_eq!(SmaIndicator.name(&IndicatorParams { period: 50 }), "50-SMA");
    assert_eq!(SmaIndicator.id(), "sma");
}

#[test]
fn zero_period_yields_nothing() {
    let series = closes(&[1.0, 2.0, 3.0]);
    assert!(sma_closes(&series, 0).is_empty());
    assert!(SmaIndicator.compute(&series, &IndicatorParams { period: 0 }).is_none());
}

proptest! {
    #[test]
    fn prop_sma_length_matches_window(len in 0usize..80, period in 1usize..30) {
        let values: Vec<f64> = (0..len).map(|i| 50.0 + i as f64).collect();
        let series = closes(&values);
        let out = SmaIndicator.compute(&series, &IndicatorParams { period });
        if len < period {
            prop_assert!(out.is_none());
        } else {
            let pts = out.unwrap();
            prop_assert_eq!(pts.len(), len - period + 1);
            prop_assert_eq!(pts.last().unwrap().t, series.last().unwrap().t);
        }
    }
}
