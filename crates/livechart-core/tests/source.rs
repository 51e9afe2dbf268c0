// File: crates/livechart-core/tests/source.rs
// Purpose: CSV directory source, timestamp parsing and the seeded synthetic source.

use chrono::{Datelike, Weekday};
use livechart_core::catalog::{Instrument, Interval};
use livechart_core::normalize::{build_request, normalize};
use livechart_core::source::{load_ohlc_csv, parse_time_to_f64};
use livechart_core::{Candle, CsvSource, MarketDataSource, SyntheticSource};
use std::fs;

/// 2024-01-12 00:00:00 UTC, a Friday.
const END: i64 = 1_705_017_600;

#[test]
fn parses_common_timestamp_shapes() {
    assert_eq!(parse_time_to_f64("1700000000"), Some(1_700_000_000.0));
    assert_eq!(parse_time_to_f64("1700000000000"), Some(1_700_000_000.0));
    assert_eq!(parse_time_to_f64("1970-01-02"), Some(86_400.0));
    assert_eq!(parse_time_to_f64("1970-01-01 00:01:00"), Some(60.0));
    assert_eq!(parse_time_to_f64("1970-01-01T01:00:00+01:00"), Some(0.0));
    assert_eq!(parse_time_to_f64(""), None);
    assert_eq!(parse_time_to_f64("yesterday"), None);
}

#[test]
fn csv_loader_accepts_aliases_and_skips_bad_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.csv");
    fs::write(&path, "Date,Open,High,Low,Adj_Close\n2024-01-02,1,2,0.5,1.5\n2024-01-03,oops,2,1,1\n2024-01-04,1.5,2.5,1.0,2.0\n")
        .unwrap();
    let candles = load_ohlc_csv(&path).unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[1].c, 2.0);
}

#[test]
fn csv_loader_drops_inconsistent_ohlc_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.csv");
    // Second row: low above the body. Third row: high below the body.
    fs::write(&path, "time,open,high,low,close\n0,10,12,9,11\n60,10,12,10.5,11\n120,10,10.5,9,11\n180,11,11.5,10,10.2\n")
        .unwrap();
    let candles = load_ohlc_csv(&path).unwrap();
    let ts: Vec<f64> = candles.iter().map(|c| c.t).collect();
    assert_eq!(ts, vec![0.0, 180.0]);
}

#[test]
fn candle_invariants_are_checked() {
    assert!(Candle::try_new(0.0, 10.0, 12.0, 9.0, 11.0).is_ok());
    assert!(Candle::try_new(0.0, 10.0, 10.5, 9.0, 11.0).is_err());
    assert!(Candle::try_new(0.0, 10.0, 12.0, 10.5, 11.0).is_err());
}

#[test]
fn synthetic_source_rejects_unusable_parameters() {
    let req = build_request(&Instrument::new("Tesla", "TSLA"), Interval::H1);
    let mut src = SyntheticSource::new(END);
    src.volatility = 0.0;
    assert!(src.fetch(&req).is_err());

    let mut src = SyntheticSource::new(END);
    src.spike_probability = 1.5;
    assert!(src.fetch(&req).is_err());
    src.spike_probability = f64::NAN;
    assert!(src.fetch(&req).is_err());
}

#[test]
fn csv_loader_reports_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("x.csv");
    fs::write(&path, "time,open,high,low\n0,1,2,0\n").unwrap();
    let err = load_ohlc_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("close"));
}

#[test]
fn csv_source_trims_to_lookback() {
    let dir = tempfile::tempdir().unwrap();
    let src = CsvSource::new(dir.path());
    let nvda = Instrument::new("NVIDIA", "NVDA");
    let path = src.path_for("NVDA", Interval::M1);
    assert!(path.ends_with("NVDA_1m.csv"));

    // Ten days of one row per day; 1m requests reach back seven days.
    let mut body = String::from("timestamp,open,high,low,close\n");
    for day in 0..10 {
        body.push_str(&format!("{},10,11,9,10.5\n", END + day * 86_400));
    }
    fs::write(&path, body).unwrap();

    let req = build_request(&nvda, Interval::M1);
    let frame = src.fetch(&req).unwrap();
    assert_eq!(frame.len(), 7);
    let series = normalize(&req, &frame).unwrap();
    assert_eq!(series.last().map(|c| c.t), Some((END + 9 * 86_400) as f64));
}

#[test]
fn csv_source_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let req = build_request(&Instrument::new("Apple", "AAPL"), Interval::D1);
    assert!(CsvSource::new(dir.path()).fetch(&req).is_err());
}

#[test]
fn synthetic_source_is_deterministic() {
    let src = SyntheticSource::new(END);
    let req = build_request(&Instrument::new("Tesla", "TSLA"), Interval::H1);
    let a = src.fetch(&req).unwrap();
    let b = src.fetch(&req).unwrap();
    assert_eq!(a, b);
    assert!(!a.is_empty());
    assert!(a.columns.iter().all(|c| c.0.get(1).map(String::as_str) == Some("TSLA")));

    let other = src.fetch(&build_request(&Instrument::new("Apple", "AAPL"), Interval::H1)).unwrap();
    assert_ne!(a.rows, other.rows);
}

#[test]
fn synthetic_stocks_skip_weekends_crypto_does_not() {
    let src = SyntheticSource::new(END);
    let weekend = |t: f64| {
        let dt = chrono::DateTime::from_timestamp(t as i64, 0).unwrap();
        matches!(dt.weekday(), Weekday::Sat | Weekday::Sun)
    };

    let stock = src.fetch(&build_request(&Instrument::new("Apple", "AAPL"), Interval::H1)).unwrap();
    assert!(stock.index.iter().all(|&t| !weekend(t)));

    let btc = src.fetch(&build_request(&Instrument::new("Bitcoin (BTC)", "BTC-USD"), Interval::H1)).unwrap();
    assert!(btc.index.iter().any(|&t| weekend(t)));
    assert_eq!(btc.len(), 60 * 24);
}

#[test]
fn synthetic_candles_are_well_formed() {
    let src = SyntheticSource::new(END);
    let req = build_request(&Instrument::new("NVIDIA", "NVDA"), Interval::M5);
    let series = normalize(&req, &src.fetch(&req).unwrap()).unwrap();
    assert!(series.iter().all(|c| c.h >= c.body_high() && c.l <= c.body_low()));
    let ts: Vec<f64> = series.iter().map(|c| c.t).collect();
    assert!(ts.windows(2).all(|w| w[0] < w[1]));
}
