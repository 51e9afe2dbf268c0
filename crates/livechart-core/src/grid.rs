// File: crates/livechart-core/src/grid.rs
// Summary: Grid/tick layout helpers and label formatting.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Price label with precision scaled to the visible span.
pub fn format_price(v: f64, span: f64) -> String {
    let decimals = if span >= 1000.0 {
        0
    } else if span >= 10.0 {
        2
    } else if span >= 0.1 {
        3
    } else {
        5
    };
    format!("{:.*}", decimals, v)
}

/// Time label for an epoch timestamp; dates only when the span covers several days.
pub fn format_time(t: f64, span_secs: f64) -> String {
    let Some(dt) = chrono::DateTime::from_timestamp(t.floor() as i64, 0) else {
        return String::new();
    };
    if span_secs > 3.0 * 86_400.0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%m-%d %H:%M").to_string()
    }
}
