// File: crates/livechart-core/src/pipeline.rs
// Summary: One synchronous run: fetch -> normalize -> filter -> {indicator, range, presentation}.
// Notes:
// - `run` never fails. Errors are logged and turned into the degraded chart
//   with the control reset to its fallback bounds.

use serde::Serialize;

use crate::catalog::{Catalog, Instrument, Interval};
use crate::chart::ChartSpec;
use crate::config::{Config, SessionConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::filter::remove_wick_outliers;
use crate::indicator::{Indicator, IndicatorParams, SmaIndicator};
use crate::normalize::{build_request, normalize};
use crate::presentation::{build_chart, PresentationInput, SessionHours};
use crate::range::{ControlBounds, RangeState, Trigger};
use crate::source::MarketDataSource;

/// Current dropdown selections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub instrument: Instrument,
    pub interval: Interval,
}

impl Selection {
    pub fn new(instrument: Instrument, interval: Interval) -> Self {
        Self { instrument, interval }
    }
}

/// Per-run counters, logged and handed to the shell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub rows: usize,
    pub kept: usize,
    pub removed: usize,
    pub indicator_points: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub chart: ChartSpec,
    pub control: ControlBounds,
    /// `None` for the degraded chart.
    pub range: Option<RangeState>,
    pub stats: Option<RunStats>,
}

impl PipelineOutput {
    pub fn fallback(err: &PipelineError) -> Self {
        Self { chart: ChartSpec::error(err), control: ControlBounds::fallback(), range: None, stats: None }
    }

    pub fn is_fallback(&self) -> bool { self.range.is_none() }
}

/// Numeric knobs of one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineSettings {
    pub iqr_multiplier: f64,
    pub padding_ratio: f64,
    pub indicator: IndicatorParams,
}

impl PipelineSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            iqr_multiplier: config.filter.iqr_multiplier,
            padding_ratio: config.range.padding_ratio,
            indicator: IndicatorParams { period: config.indicator.window },
        }
    }
}

pub struct Pipeline<S> {
    source: S,
    catalog: Catalog,
    settings: PipelineSettings,
    session: SessionConfig,
    indicator: Box<dyn Indicator>,
}

impl<S: MarketDataSource> Pipeline<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            catalog: config.catalog(),
            settings: PipelineSettings::from_config(config),
            session: config.session.clone(),
            indicator: Box::new(SmaIndicator),
        }
    }

    pub fn with_indicator(mut self, indicator: Box<dyn Indicator>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    /// Run the pipeline; failures become the degraded chart.
    pub fn run(&self, selection: &Selection, trigger: Trigger) -> PipelineOutput {
        match self.try_run(selection, trigger) {
            Ok(out) => out,
            Err(err) => {
                log::error!(
                    "pipeline failed for {} ({}), trigger {}, source {}: {}",
                    selection.instrument.symbol,
                    selection.interval,
                    trigger,
                    self.source.id(),
                    err,
                );
                PipelineOutput::fallback(&err)
            }
        }
    }

    pub fn try_run(&self, selection: &Selection, trigger: Trigger) -> PipelineResult<PipelineOutput> {
        let request = build_request(&selection.instrument, selection.interval);
        log::debug!(
            "fetch {} interval={} lookback={} extended_hours={}",
            request.symbol, request.interval, request.lookback, request.include_extended_hours
        );
        let frame = self
            .source
            .fetch(&request)
            .map_err(|e| PipelineError::no_data(&request.symbol, request.interval, format!("{:#}", e)))?;

        let raw = normalize(&request, &frame)?;
        let report = remove_wick_outliers(&raw, self.settings.iqr_multiplier);
        let series = report.series;
        if series.is_empty() {
            return Err(PipelineError::upstream("filter", anyhow::anyhow!("every candle was filtered out")));
        }

        let indicator = self
            .indicator
            .compute(&series, &self.settings.indicator)
            .map(|points| (self.indicator.name(&self.settings.indicator), points));
        let indicator_points = indicator.as_ref().map_or(0, |(_, p)| p.len());

        let range = RangeState::resolve(&series, self.settings.padding_ratio, &trigger)
            .ok_or_else(|| PipelineError::upstream("range", anyhow::anyhow!("series has no price extent")))?;

        let hours = SessionHours::from_config(&self.session).map_err(|e| PipelineError::upstream("presentation", e))?;
        let interval_label = self
            .catalog
            .interval_label(selection.interval)
            .unwrap_or_else(|| selection.interval.code());
        let chart = build_chart(PresentationInput {
            instrument: &selection.instrument,
            interval_label,
            series: &series,
            indicator,
            range: &range,
            hours: &hours,
        });

        let stats = RunStats { rows: raw.len(), kept: series.len(), removed: report.removed, indicator_points };
        log::info!(
            "{} {} [{}]: {} candles ({} outliers removed), mode {:?}, control [{:.4}, {:.4}]",
            selection.instrument.symbol,
            selection.interval,
            trigger,
            stats.kept,
            stats.removed,
            range.mode,
            range.min,
            range.max,
        );
        Ok(PipelineOutput { chart, control: range.control(), range: Some(range), stats: Some(stats) })
    }
}
