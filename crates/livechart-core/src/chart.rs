// File: crates/livechart-core/src/chart.rs
// Summary: ChartSpec, the renderer-agnostic description of one chart frame.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::indicator::IndicatorPoint;
use crate::range::AxisRange;
use crate::series::Candle;

/// Title used by the degraded chart.
pub const ERROR_TITLE: &str = "An error occurred";

/// Opaque RGB color, serialized as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let h = s.trim().strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(h.get(i..i + 2)?, 16).ok();
        let nibble = |i: usize| u8::from_str_radix(h.get(i..i + 1)?, 16).ok().map(|v| v * 17);
        match h.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CandlestickTrace {
    pub name: String,
    pub candles: Vec<Candle>,
    pub increasing: Color,
    pub decreasing: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub points: Vec<IndicatorPoint>,
    pub color: Color,
    pub width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trace {
    Candlestick(CandlestickTrace),
    Line(LineTrace),
}

/// Shaded vertical band spanning the full plot height, drawn below the data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Band {
    pub x0: f64,
    pub x1: f64,
    pub fill: Color,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimeAxis {
    /// Collapse Saturday/Sunday so closed-market days take no space.
    pub skip_weekends: bool,
    /// When false the user may zoom the time axis by dragging.
    pub fixed_range: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueAxis {
    pub range: AxisRange,
    /// The price axis is driven by the range control, not by drag-zoom.
    pub fixed_range: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub traces: Vec<Trace>,
    pub bands: Vec<Band>,
    pub x_axis: TimeAxis,
    pub y_axis: ValueAxis,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    /// Degraded chart: title and a single error annotation, nothing else.
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            traces: Vec::new(),
            bands: Vec::new(),
            x_axis: TimeAxis { skip_weekends: false, fixed_range: false },
            y_axis: ValueAxis { range: AxisRange::Auto, fixed_range: true },
            annotations: vec![Annotation { text: format!("Error: {}", message) }],
        }
    }

    pub fn is_error(&self) -> bool {
        self.traces.is_empty() && !self.annotations.is_empty()
    }

    pub fn candlesticks(&self) -> Option<&CandlestickTrace> {
        self.traces.iter().find_map(|t| match t {
            Trace::Candlestick(c) => Some(c),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineTrace> {
        self.traces.iter().filter_map(|t| match t {
            Trace::Line(l) => Some(l),
            _ => None,
        })
    }
}
