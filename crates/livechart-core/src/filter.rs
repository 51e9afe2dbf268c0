// File: crates/livechart-core/src/filter.rs
// Summary: Wick-length outlier filter using a one-sided IQR (Tukey) fence.

use crate::series::{Candle, Series};

/// Default fence multiplier applied to the interquartile range.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Wick lengths of a single candle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WickMetrics {
    pub upper: f64,
    pub lower: f64,
}

impl WickMetrics {
    pub fn of(c: &Candle) -> Self {
        Self { upper: c.h - c.body_high(), lower: c.body_low() - c.l }
    }
}

/// Per-series fences: a candle is an outlier when either wick exceeds its bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterThresholds {
    pub upper_bound: f64,
    pub lower_bound: f64,
}

impl FilterThresholds {
    /// Derive both fences from the series, `None` when it is empty.
    pub fn from_series(series: &Series, multiplier: f64) -> Option<Self> {
        let (upper, lower): (Vec<f64>, Vec<f64>) =
            series.iter().map(WickMetrics::of).map(|w| (w.upper, w.lower)).unzip();
        Some(Self { upper_bound: fence(&upper, multiplier)?, lower_bound: fence(&lower, multiplier)? })
    }

    pub fn is_outlier(&self, w: &WickMetrics) -> bool {
        w.upper > self.upper_bound || w.lower > self.lower_bound
    }
}

/// Quantile with linear interpolation between closest ranks (`q` in 0..=1).
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() { return None; }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(quantile_sorted(&sorted, q))
}

fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Q3 + multiplier * (Q3 - Q1).
pub fn fence(values: &[f64], multiplier: f64) -> Option<f64> {
    if values.is_empty() { return None; }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile_sorted(&sorted, 0.25);
    let q3 = quantile_sorted(&sorted, 0.75);
    Some(q3 + multiplier * (q3 - q1))
}

/// Outcome of one filter pass.
#[derive(Clone, Debug)]
pub struct FilterReport {
    pub series: Series,
    pub thresholds: Option<FilterThresholds>,
    pub removed: usize,
}

/// Drop candles whose upper or lower wick exceeds the series' fence. Order and
/// timestamps of the survivors are untouched.
pub fn remove_wick_outliers(series: &Series, multiplier: f64) -> FilterReport {
    let Some(th) = FilterThresholds::from_series(series, multiplier) else {
        return FilterReport { series: series.clone(), thresholds: None, removed: 0 };
    };
    let kept: Series = series.iter().copied().filter(|c| !th.is_outlier(&WickMetrics::of(c))).collect();
    let removed = series.len() - kept.len();
    log::debug!(
        "wick filter: upper<= {:.6}, lower<= {:.6}, removed {} of {}",
        th.upper_bound, th.lower_bound, removed, series.len()
    );
    FilterReport { series: kept, thresholds: Some(th), removed }
}
