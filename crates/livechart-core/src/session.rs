// File: crates/livechart-core/src/session.rs
// Summary: Shell-side session state; maps UI events to triggers and threads the control value between runs.

use anyhow::{bail, Result};

use crate::catalog::{Catalog, Interval};
use crate::pipeline::{Pipeline, PipelineOutput, Selection};
use crate::range::{ControlBounds, Trigger};
use crate::source::MarketDataSource;

/// Something the user (or the timer) did.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Page load; no input has fired yet.
    Start,
    SelectInstrument(String),
    SelectInterval(Interval),
    DragRange { low: f64, high: f64 },
    Tick,
}

/// Selections plus whatever the range control currently shows.
#[derive(Clone, Debug)]
pub struct Session {
    catalog: Catalog,
    selection: Selection,
    control: ControlBounds,
}

impl Session {
    pub fn new(catalog: Catalog, selection: Selection) -> Self {
        Self { catalog, selection, control: ControlBounds::fallback() }
    }

    /// Session on the catalog's default instrument and interval.
    pub fn with_defaults(catalog: Catalog) -> Result<Self> {
        let Some(instrument) = catalog.default_instrument().cloned() else {
            bail!("instrument catalog is empty");
        };
        let Some(interval) = catalog.default_interval() else {
            bail!("interval catalog is empty");
        };
        Ok(Self::new(catalog, Selection::new(instrument, interval)))
    }

    pub fn selection(&self) -> &Selection { &self.selection }

    pub fn control(&self) -> ControlBounds { self.control }

    pub fn catalog(&self) -> &Catalog { &self.catalog }

    /// Apply the event to the selections and name the trigger it produces.
    pub fn apply(&mut self, event: &UiEvent) -> Result<Trigger> {
        let trigger = match *event {
            UiEvent::Start => Trigger::Initial,
            UiEvent::SelectInstrument(ref symbol) => {
                let Some(instrument) = self.catalog.instrument(symbol) else {
                    bail!("unknown instrument '{}'", symbol);
                };
                self.selection.instrument = instrument.clone();
                Trigger::InstrumentChanged
            }
            UiEvent::SelectInterval(interval) => {
                if self.catalog.interval_label(interval).is_none() {
                    bail!("interval '{}' is not in the catalog", interval);
                }
                self.selection.interval = interval;
                Trigger::IntervalChanged
            }
            UiEvent::DragRange { low, high } => Trigger::RangeDragged { low, high },
            UiEvent::Tick => Trigger::TimerTick,
        };
        Ok(trigger)
    }

    /// Apply the event, run the pipeline and remember the returned control state.
    pub fn step<S: MarketDataSource>(&mut self, pipeline: &Pipeline<S>, event: &UiEvent) -> Result<PipelineOutput> {
        let trigger = self.apply(event)?;
        let out = pipeline.run(&self.selection, trigger);
        self.control = out.control;
        Ok(out)
    }
}
