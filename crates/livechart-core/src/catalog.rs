// File: crates/livechart-core/src/catalog.rs
// Summary: Instrument and interval catalogs, plus the lookback selection rule.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix that marks a symbol as a USD-quoted cryptocurrency (24/7 market).
pub const CRYPTO_SUFFIX: &str = "-USD";

/// Built-in instruments as (label, symbol).
pub const DEFAULT_INSTRUMENTS: &[(&str, &str)] = &[
    ("NVIDIA", "NVDA"),
    ("Tesla", "TSLA"),
    ("Netflix", "NFLX"),
    ("Apple", "AAPL"),
    ("Google", "GOOGL"),
    ("Microsoft", "MSFT"),
    ("Bitcoin (BTC)", "BTC-USD"),
    ("Ethereum (ETH)", "ETH-USD"),
];

/// Built-in intervals as (label, code).
pub const DEFAULT_INTERVALS: &[(&str, &str)] = &[
    ("1 Minute", "1m"),
    ("5 Minutes", "5m"),
    ("15 Minutes", "15m"),
    ("30 Minutes", "30m"),
    ("1 Hour", "1h"),
    ("1 Day", "1d"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub label: String,
    pub symbol: String,
}

impl Instrument {
    pub fn new(label: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self { label: label.into(), symbol: symbol.into() }
    }

    pub fn is_crypto(&self) -> bool {
        self.symbol.contains(CRYPTO_SUFFIX)
    }
}

/// Sampling interval supported by the market data source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "1d")]
    D1,
}

impl Interval {
    pub const ALL: [Interval; 6] = [Interval::M1, Interval::M5, Interval::M15, Interval::M30, Interval::H1, Interval::D1];

    pub fn code(self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::D1 => "1d",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn seconds(self) -> i64 {
        match self {
            Interval::M1 => 60,
            Interval::M5 => 5 * 60,
            Interval::M15 => 15 * 60,
            Interval::M30 => 30 * 60,
            Interval::H1 => 60 * 60,
            Interval::D1 => 24 * 60 * 60,
        }
    }

    pub fn is_intraday(self) -> bool { !matches!(self, Interval::D1) }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How far back a data request reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Lookback {
    #[serde(rename = "7d")]
    Days7,
    #[serde(rename = "1mo")]
    Month1,
    #[serde(rename = "60d")]
    Days60,
    #[serde(rename = "2y")]
    Years2,
}

impl Lookback {
    /// Crypto always gets the long intraday window; other instruments are
    /// tiered by interval granularity.
    pub fn select(crypto: bool, interval: Interval) -> Self {
        if crypto {
            return Lookback::Days60;
        }
        match interval {
            Interval::M1 => Lookback::Days7,
            Interval::M5 | Interval::M15 | Interval::M30 | Interval::H1 => Lookback::Month1,
            Interval::D1 => Lookback::Years2,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lookback::Days7 => "7d",
            Lookback::Month1 => "1mo",
            Lookback::Days60 => "60d",
            Lookback::Years2 => "2y",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Lookback::Days7 => 7,
            Lookback::Month1 => 30,
            Lookback::Days60 => 60,
            Lookback::Years2 => 730,
        }
    }

    pub fn seconds(self) -> i64 { self.days() * 24 * 60 * 60 }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalEntry {
    pub label: String,
    pub interval: Interval,
}

/// Labeled instruments and intervals offered to the selection inputs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub instruments: Vec<Instrument>,
    pub intervals: Vec<IntervalEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        let instruments = DEFAULT_INSTRUMENTS.iter().map(|&(l, s)| Instrument::new(l, s)).collect();
        let intervals = DEFAULT_INTERVALS
            .iter()
            .filter_map(|&(label, code)| {
                Interval::from_code(code).map(|interval| IntervalEntry { label: label.to_string(), interval })
            })
            .collect();
        Self { instruments, intervals }
    }

    pub fn instrument(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol == symbol)
    }

    pub fn interval_label(&self, interval: Interval) -> Option<&str> {
        self.intervals.iter().find(|e| e.interval == interval).map(|e| e.label.as_str())
    }

    pub fn default_instrument(&self) -> Option<&Instrument> { self.instruments.first() }

    pub fn default_interval(&self) -> Option<Interval> {
        // Intraday 5m is the default view when the catalog offers it.
        self.intervals
            .iter()
            .find(|e| e.interval == Interval::M5)
            .or_else(|| self.intervals.first())
            .map(|e| e.interval)
    }
}
