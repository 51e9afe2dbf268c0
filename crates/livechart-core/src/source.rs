// File: crates/livechart-core/src/source.rs
// Summary: Market data source collaborator: request/response types plus CSV and synthetic providers.

use anyhow::{bail, Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

use crate::catalog::{Interval, Lookback};
use crate::series::Candle;

/// One request to the market data source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataRequest {
    pub symbol: String,
    pub lookback: Lookback,
    pub interval: Interval,
    /// Pre/post-market rows. Providers without session information ignore it.
    pub include_extended_hours: bool,
}

/// Column key as delivered by the provider. Multi-ticker downloads carry a
/// second level with the ticker, e.g. `["Close", "NVDA"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnKey(pub Vec<String>);

impl ColumnKey {
    pub fn flat(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    pub fn nested(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self(vec![name.into(), ticker.into()])
    }

    /// Top-level field name (e.g. "Close").
    pub fn field(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn levels(&self) -> usize { self.0.len() }
}

/// Raw provider response: timestamp index plus row-major values, one value per column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawFrame {
    pub columns: Vec<ColumnKey>,
    pub index: Vec<f64>,
    pub rows: Vec<Vec<f64>>,
}

impl RawFrame {
    pub fn empty() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn len(&self) -> usize { self.rows.len() }

    /// Flat Open/High/Low/Close frame built from candles.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let columns = ["Open", "High", "Low", "Close"].into_iter().map(ColumnKey::flat).collect();
        let index = candles.iter().map(|c| c.t).collect();
        let rows = candles.iter().map(|c| vec![c.o, c.h, c.l, c.c]).collect();
        Self { columns, index, rows }
    }

    /// Same frame with every column nested under `ticker`, the way multi-ticker
    /// downloads arrive.
    pub fn with_ticker_level(mut self, ticker: &str) -> Self {
        for col in &mut self.columns {
            col.0.truncate(1);
            col.0.push(ticker.to_string());
        }
        self
    }
}

/// External market data provider. Calls are synchronous; any error is
/// reported by the pipeline as missing data.
pub trait MarketDataSource {
    fn id(&self) -> &'static str;
    fn fetch(&self, request: &DataRequest) -> Result<RawFrame>;
}

impl<S: MarketDataSource + ?Sized> MarketDataSource for Box<S> {
    fn id(&self) -> &'static str { (**self).id() }
    fn fetch(&self, request: &DataRequest) -> Result<RawFrame> { (**self).fetch(request) }
}

impl<S: MarketDataSource + ?Sized> MarketDataSource for &S {
    fn id(&self) -> &'static str { (**self).id() }
    fn fetch(&self, request: &DataRequest) -> Result<RawFrame> { (**self).fetch(request) }
}

// ---- CSV directory ----------------------------------------------------------

/// Reads `<dir>/<symbol>_<interval>.csv` files with OHLC columns.
pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str, interval: Interval) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", symbol, interval.code()))
    }
}

impl MarketDataSource for CsvSource {
    fn id(&self) -> &'static str { "csv" }

    fn fetch(&self, request: &DataRequest) -> Result<RawFrame> {
        let path = self.path_for(&request.symbol, request.interval);
        let mut candles = load_ohlc_csv(&path)
            .with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        log::debug!("csv source: {} rows from {}", candles.len(), path.display());

        // Keep only the lookback window ending at the newest row.
        if let Some(last) = candles.last().map(|c| c.t) {
            let cutoff = last - request.lookback.seconds() as f64;
            candles.retain(|c| c.t > cutoff);
        }
        Ok(RawFrame::from_candles(&candles))
    }
}

/// Load an OHLC CSV into candles. Header names are matched case-insensitively
/// against common aliases; rows with unparsable prices are skipped.
pub fn load_ohlc_csv(path: &Path) -> Result<Vec<Candle>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    log::debug!("csv headers: {:?}", headers);

    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.iter().any(|want| h == want))
    };

    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"])
        .context("missing time column")?;
    let i_open = idx(&["open", "o"]).context("missing open column")?;
    let i_high = idx(&["high", "h"]).context("missing high column")?;
    let i_low = idx(&["low", "l"]).context("missing low column")?;
    let i_close = idx(&["close", "c", "adj_close", "close_price"]).context("missing close column")?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    let mut inconsistent = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let parse = |i: usize| -> Option<f64> { rec.get(i).and_then(|s| s.trim().parse::<f64>().ok()) };
        let t = rec.get(i_time).and_then(parse_time_to_f64);
        match (t, parse(i_open), parse(i_high), parse(i_low), parse(i_close)) {
            (Some(t), Some(o), Some(h), Some(l), Some(c)) => match Candle::try_new(t, o, h, l, c) {
                Ok(candle) => out.push(candle),
                Err(why) => {
                    log::debug!("{}: dropping row at t={}: {}", path.display(), t, why);
                    inconsistent += 1;
                }
            },
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("{}: skipped {} unparsable rows", path.display(), skipped);
    }
    if inconsistent > 0 {
        log::warn!("{}: skipped {} rows with inconsistent OHLC", path.display(), inconsistent);
    }
    Ok(out)
}

/// Parse a timestamp cell: epoch seconds/milliseconds or RFC 3339 / `YYYY-MM-DD[ HH:MM:SS]`.
pub fn parse_time_to_f64(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0);
        } // epoch ms -> sec
        return Some(n as f64);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp() as f64);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp() as f64);
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp() as f64);
    }
    None
}

// ---- Synthetic --------------------------------------------------------------

/// Deterministic seeded random walk, one stream per (symbol, interval).
/// Non-crypto symbols skip weekends. A rare long-wick spike is injected so the
/// outlier filter has something to do.
pub struct SyntheticSource {
    /// Timestamp of the newest candle (epoch seconds); rounded down to the interval.
    pub end: i64,
    pub volatility: f64,
    pub spike_probability: f64,
    pub max_candles: usize,
}

impl SyntheticSource {
    pub fn new(end: i64) -> Self {
        Self { end, volatility: 0.002, spike_probability: 0.002, max_candles: 10_000 }
    }

    pub fn now() -> Self {
        Self::new(chrono::Utc::now().timestamp())
    }

    fn seed_for(symbol: &str, interval: Interval) -> u64 {
        // FNV-1a over the symbol, mixed with the interval length.
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in symbol.bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        h ^ (interval.seconds() as u64).rotate_left(17)
    }

    fn timestamps(&self, crypto: bool, interval: Interval, lookback: Lookback) -> Vec<i64> {
        let step = interval.seconds();
        let end = self.end - self.end.rem_euclid(step);
        let start = end - lookback.seconds();
        let mut ts = Vec::new();
        let mut t = end;
        while t > start && ts.len() < self.max_candles {
            if crypto || !is_weekend(t) {
                ts.push(t);
            }
            t -= step;
        }
        ts.reverse();
        ts
    }
}

fn is_weekend(t: i64) -> bool {
    use chrono::{Datelike, Weekday};
    match chrono::DateTime::from_timestamp(t, 0) {
        Some(dt) => matches!(dt.weekday(), Weekday::Sat | Weekday::Sun),
        None => false,
    }
}

impl MarketDataSource for SyntheticSource {
    fn id(&self) -> &'static str { "synthetic" }

    fn fetch(&self, request: &DataRequest) -> Result<RawFrame> {
        // rand rejects empty ranges and probabilities outside 0..=1 by panicking.
        if !(self.volatility.is_finite() && self.volatility > 0.0) {
            bail!("synthetic volatility must be a positive number, got {}", self.volatility);
        }
        if !(0.0..=1.0).contains(&self.spike_probability) {
            bail!("synthetic spike probability must be within 0..=1, got {}", self.spike_probability);
        }
        let crypto = request.symbol.contains(crate::catalog::CRYPTO_SUFFIX);
        let mut rng = ChaCha8Rng::seed_from_u64(Self::seed_for(&request.symbol, request.interval));
        let vol = self.volatility * (request.interval.seconds() as f64 / 60.0).sqrt();
        let mut price: f64 = rng.gen_range(50.0..500.0);

        let mut candles = Vec::new();
        for t in self.timestamps(crypto, request.interval, request.lookback) {
            let o = price;
            let c = (o * (1.0 + rng.gen_range(-vol..vol))).max(0.01);
            let mut upper = o.max(c) * vol * rng.gen::<f64>() * 0.5;
            let lower = o.min(c) * vol * rng.gen::<f64>() * 0.5;
            if rng.gen_bool(self.spike_probability) {
                upper = upper.max(o * vol) * 50.0;
            }
            candles.push(Candle::new(t as f64, o, o.max(c) + upper, (o.min(c) - lower).max(0.0), c));
            price = c;
        }
        Ok(RawFrame::from_candles(&candles).with_ticker_level(&request.symbol))
    }
}

/// Fixed response regardless of the request; useful for tests and benches.
pub struct StaticSource {
    pub frame: RawFrame,
}

impl StaticSource {
    pub fn new(frame: RawFrame) -> Self { Self { frame } }

    pub fn from_candles(candles: &[Candle]) -> Self { Self::new(RawFrame::from_candles(candles)) }
}

impl MarketDataSource for StaticSource {
    fn id(&self) -> &'static str { "static" }

    fn fetch(&self, _request: &DataRequest) -> Result<RawFrame> {
        Ok(self.frame.clone())
    }
}
