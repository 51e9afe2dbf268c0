// File: crates/livechart-core/src/indicator.rs
// Summary: Indicator trait and the trailing SMA over candle closes.

use serde::Serialize;

use crate::series::Series;

/// Default SMA window, in candles.
pub const DEFAULT_SMA_WINDOW: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub t: f64,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorParams {
    pub period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self { Self { period: DEFAULT_SMA_WINDOW } }
}

/// Indicator transforms a candle series into points aligned to its timestamps.
/// `None` means the indicator is not defined for this series at all.
pub trait Indicator {
    fn id(&self) -> &'static str;
    fn name(&self, params: &IndicatorParams) -> String;
    fn compute(&self, input: &Series, params: &IndicatorParams) -> Option<Vec<IndicatorPoint>>;
}

/// Helper: SMA over candle closes, one point per full window, stamped with the
/// window's last candle.
pub fn sma_closes(series: &Series, period: usize) -> Vec<IndicatorPoint> {
    let data = series.candles();
    if period == 0 || data.len() < period { return Vec::new(); }
    let mut out = Vec::with_capacity(data.len() - period + 1);
    let mut sum = 0.0f64;
    for i in 0..data.len() {
        sum += data[i].c;
        if i + 1 >= period {
            if i + 1 > period { sum -= data[i - period].c; }
            out.push(IndicatorPoint { t: data[i].t, value: sum / (period as f64) });
        }
    }
    out
}

/// Simple moving average of close; omitted entirely when the series is
/// shorter than the window.
pub struct SmaIndicator;

impl Indicator for SmaIndicator {
    fn id(&self) -> &'static str { "sma" }

    fn name(&self, params: &IndicatorParams) -> String { format!("{}-SMA", params.period) }

    fn compute(&self, input: &Series, params: &IndicatorParams) -> Option<Vec<IndicatorPoint>> {
        if params.period == 0 || input.len() < params.period {
            return None;
        }
        Some(sma_closes(input, params.period))
    }
}
