// File: crates/livechart-core/src/error.rs
// Summary: Pipeline error taxonomy.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Provider returned nothing usable: empty rows, all-NaN rows, or a failed request.
    #[error("no data for {symbol} ({interval}): {reason}")]
    NoData {
        symbol: String,
        interval: String,
        reason: String,
    },

    /// Any other failure while normalizing, filtering, computing the indicator
    /// or assembling the chart.
    #[error("{stage} failed: {source:#}")]
    Upstream {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    pub fn no_data(symbol: impl Into<String>, interval: impl ToString, reason: impl Into<String>) -> Self {
        PipelineError::NoData { symbol: symbol.into(), interval: interval.to_string(), reason: reason.into() }
    }

    pub fn upstream(stage: &'static str, source: impl Into<anyhow::Error>) -> Self {
        PipelineError::Upstream { stage, source: source.into() }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, PipelineError::NoData { .. })
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
