// File: crates/livechart-core/src/view.rs
// Visible world ranges for a ChartSpec, and the time-axis mapping that collapses weekends.

use crate::chart::ChartSpec;
use crate::range::AxisRange;

const DAY: f64 = 86_400.0;
const WEEK: f64 = 7.0 * DAY;
const TRADING_WEEK: f64 = 5.0 * DAY;
// 1970-01-01 was a Thursday; shifting by three days puts week starts on Monday.
const MONDAY_SHIFT: f64 = 3.0 * DAY;

/// Maps epoch seconds to x-axis coordinates. With `skip_weekends`, Saturday
/// and Sunday occupy zero width and the mapping is non-decreasing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeMapping {
    pub skip_weekends: bool,
}

impl TimeMapping {
    pub fn to_axis(&self, t: f64) -> f64 {
        if !self.skip_weekends { return t; }
        let s = t + MONDAY_SHIFT;
        let week = (s / WEEK).floor();
        let r = s - week * WEEK;
        week * TRADING_WEEK + r.min(TRADING_WEEK) - MONDAY_SHIFT
    }

    pub fn from_axis(&self, x: f64) -> f64 {
        if !self.skip_weekends { return x; }
        let s = x + MONDAY_SHIFT;
        let week = (s / TRADING_WEEK).floor();
        let r = s - week * TRADING_WEEK;
        week * WEEK + r - MONDAY_SHIFT
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub mapping: TimeMapping,
}

impl ViewState {
    pub fn from_spec(spec: &ChartSpec) -> Self {
        let mapping = TimeMapping { skip_weekends: spec.x_axis.skip_weekends };
        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut n = 0usize;
        if let Some(trace) = spec.candlesticks() {
            for c in &trace.candles {
                let x = mapping.to_axis(c.t);
                x_min = x_min.min(x);
                x_max = x_max.max(x);
            }
            n = trace.candles.len();
        }
        let (y_min, y_max) = match spec.y_axis.range {
            AxisRange::Fixed { low, high } => (low.min(high), low.max(high)),
            AxisRange::Auto => match visible_y_range(spec) {
                Some((lo, hi)) => {
                    let m = (hi - lo) * 0.02;
                    (lo - m, hi + m)
                }
                None => (0.0, 1.0),
            },
        };
        if !x_min.is_finite() || !x_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min, y_max, mapping }.ensure_span();
        }
        // Half a bar of air on both sides.
        let pad = if n > 1 { (x_max - x_min) / (n - 1) as f64 * 0.5 } else { 0.5 };
        Self { x_min: x_min - pad, x_max: x_max + pad, y_min, y_max, mapping }.ensure_span()
    }

    fn ensure_span(mut self) -> Self {
        if (self.x_max - self.x_min).abs() < 1e-9 { self.x_max = self.x_min + 1.0; }
        if (self.y_max - self.y_min).abs() < 1e-9 { self.y_max = self.y_min + 1.0; }
        self
    }
}

/// Lowest low / highest high over candles and indicator values, `None` when
/// the chart has no data.
pub fn visible_y_range(spec: &ChartSpec) -> Option<(f64, f64)> {
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    if let Some(trace) = spec.candlesticks() {
        for c in &trace.candles {
            y_min = y_min.min(c.l);
            y_max = y_max.max(c.h);
        }
    }
    for line in spec.lines() {
        for p in &line.points {
            y_min = y_min.min(p.value);
            y_max = y_max.max(p.value);
        }
    }
    if y_min.is_finite() && y_max.is_finite() { Some((y_min, y_max)) } else { None }
}
