// File: crates/livechart-core/tests/catalog.rs
// Purpose: Built-in catalogs, interval codes and the lookback rule.

use livechart_core::catalog::{Catalog, Instrument, Interval, Lookback};

#[test]
fn lookback_rule_table() {
    use Interval::*;
    for interval in Interval::ALL {
        assert_eq!(Lookback::select(true, interval), Lookback::Days60, "crypto {interval}");
    }
    assert_eq!(Lookback::select(false, M1), Lookback::Days7);
    for interval in [M5, M15, M30, H1] {
        assert_eq!(Lookback::select(false, interval), Lookback::Month1, "{interval}");
    }
    assert_eq!(Lookback::select(false, D1), Lookback::Years2);
    assert_eq!(Lookback::Years2.code(), "2y");
    assert_eq!(Lookback::Days7.seconds(), 7 * 86_400);
}

#[test]
fn interval_codes_round_trip() {
    for interval in Interval::ALL {
        assert_eq!(Interval::from_code(interval.code()), Some(interval));
    }
    assert_eq!(Interval::from_code("2h"), None);
    assert_eq!(Interval::H1.seconds(), 3600);
    assert!(!Interval::D1.is_intraday());
}

#[test]
fn crypto_is_recognised_by_suffix() {
    assert!(Instrument::new("Bitcoin (BTC)", "BTC-USD").is_crypto());
    assert!(!Instrument::new("Apple", "AAPL").is_crypto());
}

#[test]
fn builtin_catalog_defaults() {
    let cat = Catalog::builtin();
    assert_eq!(cat.instruments.len(), 8);
    assert_eq!(cat.intervals.len(), 6);
    assert_eq!(cat.default_instrument().map(|i| i.symbol.as_str()), Some("NVDA"));
    assert_eq!(cat.default_interval(), Some(Interval::M5));
    assert_eq!(cat.interval_label(Interval::H1), Some("1 Hour"));
    assert_eq!(cat.instrument("ETH-USD").map(|i| i.label.as_str()), Some("Ethereum (ETH)"));
    assert!(cat.instrument("DOGE-USD").is_none());
}
