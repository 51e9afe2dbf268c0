// File: crates/livechart-core/src/range.rs
// Summary: Range controller; reconciles the manual price-range control with the chart's y axis.
//
// Every run derives its mode from the trigger alone:
//   RangeDragged(low, high) -> Manual: axis pinned to [low, high], value echoed.
//   anything else           -> Auto:   axis auto-ranges, value reset to [min, max].
// In both modes the control's travel [min, max] is the padded extent of the
// current (filtered) series.

use serde::Serialize;
use std::fmt;

use crate::series::Series;

/// Fraction of the data span added below the low and above the high.
pub const DEFAULT_PADDING_RATIO: f64 = 0.1;

/// Bounds and value the control shows when the pipeline fails.
pub const FALLBACK_MIN: f64 = 0.0;
pub const FALLBACK_MAX: f64 = 100.0;

/// The input that started a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// First render, nothing has fired yet.
    Initial,
    InstrumentChanged,
    IntervalChanged,
    RangeDragged { low: f64, high: f64 },
    TimerTick,
}

impl Trigger {
    pub fn is_drag(&self) -> bool { matches!(self, Trigger::RangeDragged { .. }) }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Initial => f.write_str("initial"),
            Trigger::InstrumentChanged => f.write_str("instrument-changed"),
            Trigger::IntervalChanged => f.write_str("interval-changed"),
            Trigger::RangeDragged { low, high } => write!(f, "range-dragged[{low}, {high}]"),
            Trigger::TimerTick => f.write_str("timer-tick"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    Auto,
    Manual,
}

/// Y axis instruction for the chart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AxisRange {
    Auto,
    Fixed { low: f64, high: f64 },
}

/// What the manual range control receives back: travel bounds and value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ControlBounds {
    pub min: f64,
    pub max: f64,
    pub value: [f64; 2],
}

impl ControlBounds {
    pub const fn fallback() -> Self {
        Self { min: FALLBACK_MIN, max: FALLBACK_MAX, value: [FALLBACK_MIN, FALLBACK_MAX] }
    }
}

impl Default for ControlBounds {
    fn default() -> Self { Self::fallback() }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RangeState {
    pub min: f64,
    pub max: f64,
    pub current_low: f64,
    pub current_high: f64,
    pub mode: RangeMode,
}

impl RangeState {
    /// Transition function: padded data bounds plus the trigger decide the state.
    pub fn transition(data_low: f64, data_high: f64, padding_ratio: f64, trigger: &Trigger) -> Self {
        let (min, max) = padded_bounds(data_low, data_high, padding_ratio);
        match *trigger {
            Trigger::RangeDragged { low, high } => {
                Self { min, max, current_low: low, current_high: high, mode: RangeMode::Manual }
            }
            Trigger::Initial | Trigger::InstrumentChanged | Trigger::IntervalChanged | Trigger::TimerTick => {
                Self { min, max, current_low: min, current_high: max, mode: RangeMode::Auto }
            }
        }
    }

    /// Resolve against a series; `None` when the series is empty.
    pub fn resolve(series: &Series, padding_ratio: f64, trigger: &Trigger) -> Option<Self> {
        let (lo, hi) = series.price_extent()?;
        Some(Self::transition(lo, hi, padding_ratio, trigger))
    }

    pub fn axis_range(&self) -> AxisRange {
        match self.mode {
            RangeMode::Auto => AxisRange::Auto,
            RangeMode::Manual => AxisRange::Fixed { low: self.current_low, high: self.current_high },
        }
    }

    pub fn control(&self) -> ControlBounds {
        ControlBounds { min: self.min, max: self.max, value: [self.current_low, self.current_high] }
    }
}

/// [low - p*span, high + p*span].
pub fn padded_bounds(low: f64, high: f64, padding_ratio: f64) -> (f64, f64) {
    let pad = (high - low) * padding_ratio;
    (low - pad, high + pad)
}
