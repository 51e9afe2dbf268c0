// File: crates/livechart-core/src/presentation.rs
// Summary: Presentation builder; assembles a ChartSpec from the cleaned series, indicator and range.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use std::collections::BTreeSet;

use crate::catalog::Instrument;
use crate::chart::{Band, CandlestickTrace, ChartSpec, Color, LineTrace, TimeAxis, Trace, ValueAxis};
use crate::config::{ConfigError, SessionConfig};
use crate::indicator::IndicatorPoint;
use crate::range::RangeState;
use crate::series::Series;

pub const CANDLE_UP: Color = Color::rgb(0x26, 0xA6, 0x9A);
pub const CANDLE_DOWN: Color = Color::rgb(0xEF, 0x53, 0x50);
pub const INDICATOR_COLOR: Color = Color::rgb(0xFF, 0xC8, 0x00);
pub const INDICATOR_WIDTH: f32 = 1.5;
pub const BAND_FILL: Color = Color::rgb(0x44, 0x44, 0x44);
pub const BAND_OPACITY: f32 = 0.2;

const PRICE_TRACE_NAME: &str = "Price";

/// Session clock used to shade non-trading hours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub offset: FixedOffset,
}

impl SessionHours {
    pub fn from_config(cfg: &SessionConfig) -> Result<Self, ConfigError> {
        let offset = FixedOffset::east_opt(cfg.utc_offset_minutes * 60)
            .ok_or_else(|| ConfigError::Invalid(format!("utc offset {} minutes out of range", cfg.utc_offset_minutes)))?;
        Ok(Self { open: cfg.open_time()?, close: cfg.close_time()?, offset })
    }

    /// Calendar day of an epoch timestamp on the session clock.
    pub fn day_of(&self, t: f64) -> Option<NaiveDate> {
        DateTime::from_timestamp(t.floor() as i64, 0).map(|dt| dt.with_timezone(&self.offset).date_naive())
    }

    /// Epoch seconds of `time` on `day`, session clock.
    pub fn epoch_at(&self, day: NaiveDate, time: NaiveTime) -> f64 {
        let local = day.and_time(time).and_utc().timestamp();
        (local - self.offset.local_minus_utc() as i64) as f64
    }
}

/// Two bands per calendar day: midnight to open, close to 23:59.
pub fn non_trading_bands(series: &Series, hours: &SessionHours) -> Vec<Band> {
    let days: BTreeSet<NaiveDate> = series.iter().filter_map(|c| hours.day_of(c.t)).collect();
    let (Some(midnight), Some(end_of_day)) = (NaiveTime::from_hms_opt(0, 0, 0), NaiveTime::from_hms_opt(23, 59, 0)) else {
        return Vec::new();
    };
    let band = |x0: f64, x1: f64| Band { x0, x1, fill: BAND_FILL, opacity: BAND_OPACITY };

    let mut out = Vec::with_capacity(days.len() * 2);
    for day in days {
        out.push(band(hours.epoch_at(day, midnight), hours.epoch_at(day, hours.open)));
        out.push(band(hours.epoch_at(day, hours.close), hours.epoch_at(day, end_of_day)));
    }
    out
}

/// "<instrument label> - <interval label>".
pub fn chart_title(instrument: &Instrument, interval_label: &str) -> String {
    format!("{} - {}", instrument.label, interval_label)
}

/// Everything the builder needs for one frame.
pub struct PresentationInput<'a> {
    pub instrument: &'a Instrument,
    pub interval_label: &'a str,
    pub series: &'a Series,
    /// Named indicator points, absent when the series is too short.
    pub indicator: Option<(String, Vec<IndicatorPoint>)>,
    pub range: &'a RangeState,
    pub hours: &'a SessionHours,
}

pub fn build_chart(input: PresentationInput<'_>) -> ChartSpec {
    let crypto = input.instrument.is_crypto();

    let mut traces = vec![Trace::Candlestick(CandlestickTrace {
        name: PRICE_TRACE_NAME.to_string(),
        candles: input.series.candles().to_vec(),
        increasing: CANDLE_UP,
        decreasing: CANDLE_DOWN,
    })];
    if let Some((name, points)) = input.indicator {
        traces.push(Trace::Line(LineTrace { name, points, color: INDICATOR_COLOR, width: INDICATOR_WIDTH }));
    }

    // 24/7 markets get neither session shading nor weekend gaps.
    let bands = if crypto { Vec::new() } else { non_trading_bands(input.series, input.hours) };

    ChartSpec {
        title: chart_title(input.instrument, input.interval_label),
        traces,
        bands,
        x_axis: TimeAxis { skip_weekends: !crypto, fixed_range: false },
        y_axis: ValueAxis { range: input.range.axis_range(), fixed_range: true },
        annotations: Vec::new(),
    }
}
