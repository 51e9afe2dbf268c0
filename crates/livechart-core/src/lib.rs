// File: crates/livechart-core/src/lib.rs
// Summary: Core library entry point; data pipeline, range controller, chart spec and rendering.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod indicator;
pub mod normalize;
pub mod pipeline;
pub mod presentation;
pub mod range;
pub mod render;
pub mod series;
pub mod session;
pub mod source;
pub mod theme;
pub mod types;
pub mod view;

pub use catalog::{Catalog, Instrument, Interval, Lookback};
pub use chart::{ChartSpec, Color, Trace};
pub use config::{Config, ConfigError};
pub use error::{PipelineError, PipelineResult};
pub use filter::{remove_wick_outliers, FilterThresholds, WickMetrics};
pub use indicator::{Indicator, IndicatorParams, IndicatorPoint, SmaIndicator};
pub use pipeline::{Pipeline, PipelineOutput, Selection};
pub use range::{AxisRange, ControlBounds, RangeMode, RangeState, Trigger};
pub use render::{render_to_png, render_to_png_bytes, RenderOptions};
pub use series::{Candle, Series};
pub use session::{Session, UiEvent};
pub use source::{CsvSource, DataRequest, MarketDataSource, RawFrame, StaticSource, SyntheticSource};
pub use theme::Theme;
pub use view::ViewState;
