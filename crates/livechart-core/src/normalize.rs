// File: crates/livechart-core/src/normalize.rs
// Summary: Series normalizer; turns a raw provider frame into a canonical OHLC Series.

use anyhow::anyhow;

use crate::catalog::{Instrument, Interval, Lookback};
use crate::error::{PipelineError, PipelineResult};
use crate::series::{Candle, Series};
use crate::source::{DataRequest, RawFrame};

/// Build the data request for a selection, applying the lookback rule.
/// Extended hours are requested only for exchange-traded instruments.
pub fn build_request(instrument: &Instrument, interval: Interval) -> DataRequest {
    let crypto = instrument.is_crypto();
    DataRequest {
        symbol: instrument.symbol.clone(),
        lookback: Lookback::select(crypto, interval),
        interval,
        include_extended_hours: !crypto,
    }
}

/// Column positions of the OHLC fields after collapsing multi-level keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct OhlcColumns {
    open: usize,
    high: usize,
    low: usize,
    close: usize,
}

fn locate_columns(frame: &RawFrame) -> Option<OhlcColumns> {
    // Only the top level matters; a ticker level underneath is dropped.
    let find = |name: &str| {
        frame
            .columns
            .iter()
            .position(|k| k.field().is_some_and(|f| f.trim().eq_ignore_ascii_case(name)))
    };
    Some(OhlcColumns { open: find("open")?, high: find("high")?, low: find("low")?, close: find("close")? })
}

/// Normalize a provider frame for `request` into a non-empty Series.
///
/// Empty frames (or frames where every row has a non-finite price) yield
/// `NoData`; structurally broken frames yield `Upstream`.
pub fn normalize(request: &DataRequest, frame: &RawFrame) -> PipelineResult<Series> {
    if frame.is_empty() {
        return Err(PipelineError::no_data(&request.symbol, request.interval, "provider returned zero rows"));
    }
    if frame.index.len() != frame.rows.len() {
        return Err(PipelineError::upstream(
            "normalize",
            anyhow!("index has {} entries but frame has {} rows", frame.index.len(), frame.rows.len()),
        ));
    }
    let cols = locate_columns(frame).ok_or_else(|| {
        PipelineError::upstream("normalize", anyhow!("missing OHLC columns in {:?}", frame.columns))
    })?;

    let width = frame.columns.len();
    let mut series = Series::new();
    let mut dropped = 0usize;
    for (row_ix, (&t, row)) in frame.index.iter().zip(&frame.rows).enumerate() {
        if row.len() != width {
            return Err(PipelineError::upstream(
                "normalize",
                anyhow!("row {} has {} values, expected {}", row_ix, row.len(), width),
            ));
        }
        let candle = Candle::new(t, row[cols.open], row[cols.high], row[cols.low], row[cols.close]);
        if candle.is_finite() {
            series.push(candle);
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        log::debug!("normalize {}: dropped {} rows with missing prices", request.symbol, dropped);
    }
    if series.is_empty() {
        return Err(PipelineError::no_data(&request.symbol, request.interval, "every row had missing prices"));
    }
    Ok(series)
}
