// File: crates/livechart-core/tests/presentation.rs
// Purpose: Chart assembly: session bands, titles, colors and the degraded chart.

use chrono::{NaiveDate, NaiveTime};
use livechart_core::catalog::Instrument;
use livechart_core::chart::{ChartSpec, Color, ERROR_TITLE};
use livechart_core::config::SessionConfig;
use livechart_core::presentation::{
    build_chart, chart_title, non_trading_bands, PresentationInput, SessionHours, BAND_FILL, BAND_OPACITY,
    CANDLE_DOWN, CANDLE_UP,
};
use livechart_core::range::{RangeState, Trigger};
use livechart_core::series::{Candle, Series};
use livechart_core::indicator::IndicatorPoint;

/// 2024-01-08 00:00:00 UTC, a Monday.
const MONDAY: f64 = 1_704_672_000.0;
const DAY: f64 = 86_400.0;

fn two_days() -> Series {
    Series::from_candles(vec![
        Candle::new(MONDAY + 17.0 * 3600.0, 10.0, 11.0, 9.5, 10.5),
        Candle::new(MONDAY + 18.0 * 3600.0, 10.5, 10.8, 9.9, 10.0),
        Candle::new(MONDAY + DAY + 17.0 * 3600.0, 10.0, 12.0, 9.0, 11.5),
    ])
}

fn default_hours() -> SessionHours {
    SessionHours::from_config(&SessionConfig::default()).unwrap()
}

#[test]
fn bands_cover_closed_hours_of_each_day() {
    let bands = non_trading_bands(&two_days(), &default_hours());
    assert_eq!(bands.len(), 4);

    assert_eq!(bands[0].x0, MONDAY);
    assert_eq!(bands[0].x1, MONDAY + 16.5 * 3600.0);
    assert_eq!(bands[1].x0, MONDAY + 23.0 * 3600.0);
    assert_eq!(bands[1].x1, MONDAY + 23.0 * 3600.0 + 59.0 * 60.0);
    assert_eq!(bands[2].x0, MONDAY + DAY);
    for b in &bands {
        assert_eq!(b.fill, BAND_FILL);
        assert_eq!(b.opacity, BAND_OPACITY);
        assert!(b.x0 < b.x1);
    }
}

#[test]
fn session_offset_moves_day_boundaries() {
    let cfg = SessionConfig { open: "09:30".into(), close: "16:00".into(), utc_offset_minutes: -300 };
    let hours = SessionHours::from_config(&cfg).unwrap();
    // Monday 02:00 UTC is still Sunday on a UTC-5 clock.
    assert_eq!(hours.day_of(MONDAY + 2.0 * 3600.0), NaiveDate::from_ymd_opt(2024, 1, 7));
    let day = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap();
    let open = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    assert_eq!(hours.epoch_at(day, open), MONDAY + 14.5 * 3600.0);
}

#[test]
fn stock_chart_layout() {
    let series = two_days();
    let instrument = Instrument::new("Apple", "AAPL");
    let range = RangeState::resolve(&series, 0.1, &Trigger::Initial).unwrap();
    let hours = default_hours();
    let chart = build_chart(PresentationInput {
        instrument: &instrument,
        interval_label: "1 Hour",
        series: &series,
        indicator: Some(("20-SMA".to_string(), vec![IndicatorPoint { t: series.candles()[2].t, value: 10.7 }])),
        range: &range,
        hours: &hours,
    });

    assert_eq!(chart.title, "Apple - 1 Hour");
    let candles = chart.candlesticks().unwrap();
    assert_eq!(candles.increasing, CANDLE_UP);
    assert_eq!(candles.decreasing, CANDLE_DOWN);
    assert_eq!(candles.candles.len(), 3);
    let line = chart.lines().next().unwrap();
    assert_eq!(line.color, Color::rgb(255, 200, 0));
    assert_eq!(line.width, 1.5);
    assert_eq!(chart.bands.len(), 4);
    assert!(chart.x_axis.skip_weekends);
    assert!(!chart.x_axis.fixed_range);
    assert!(!chart.is_error());
}

#[test]
fn crypto_chart_has_no_session_shading() {
    let series = two_days();
    let instrument = Instrument::new("Ethereum (ETH)", "ETH-USD");
    let range = RangeState::resolve(&series, 0.1, &Trigger::TimerTick).unwrap();
    let hours = default_hours();
    let chart = build_chart(PresentationInput {
        instrument: &instrument,
        interval_label: "5 Minutes",
        series: &series,
        indicator: None,
        range: &range,
        hours: &hours,
    });
    assert!(chart.bands.is_empty());
    assert!(!chart.x_axis.skip_weekends);
    assert_eq!(chart.lines().count(), 0);
}

#[test]
fn error_chart_carries_message_only() {
    let chart = ChartSpec::error("boom");
    assert_eq!(chart.title, ERROR_TITLE);
    assert!(chart.traces.is_empty());
    assert!(chart.bands.is_empty());
    assert_eq!(chart.annotations[0].text, "Error: boom");
    assert!(chart.is_error());
}

#[test]
fn titles_and_colors() {
    assert_eq!(chart_title(&Instrument::new("Tesla", "TSLA"), "1 Day"), "Tesla - 1 Day");
    assert_eq!(Color::parse_hex("#26A69A"), Some(CANDLE_UP));
    assert_eq!(Color::parse_hex("#fff"), Some(Color::rgb(255, 255, 255)));
    assert_eq!(Color::parse_hex("26A69A"), None);
    assert_eq!(CANDLE_DOWN.to_string(), "#EF5350");
}
