// File: crates/livechart-core/tests/config.rs
// Purpose: TOML configuration defaults, overrides and validation.

use livechart_core::catalog::Interval;
use livechart_core::{Config, ConfigError};
use std::io::Write;

#[test]
fn empty_document_gives_defaults() {
    let cfg = Config::from_toml("").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.filter.iqr_multiplier, 1.5);
    assert_eq!(cfg.indicator.window, 20);
    assert_eq!(cfg.range.padding_ratio, 0.1);
    assert_eq!(cfg.general.refresh_secs, 60);
    assert_eq!(cfg.session.open, "16:30");
    assert_eq!(cfg.catalog().instruments.len(), 8);
}

#[test]
fn sections_override_individual_fields() {
    let cfg = Config::from_toml(
        r#"
[general]
theme = "light"

[indicator]
window = 50

[session]
open = "09:30"
close = "16:00"
utc_offset_minutes = -300

[[instruments]]
label = "AMD"
symbol = "AMD"

[[intervals]]
label = "Hourly"
interval = "1h"
"#,
    )
    .unwrap();
    assert_eq!(cfg.general.theme, "light");
    assert_eq!(cfg.general.refresh_secs, 60);
    assert_eq!(cfg.indicator.window, 50);
    assert_eq!(cfg.session.utc_offset_minutes, -300);
    let cat = cfg.catalog();
    assert_eq!(cat.instruments.len(), 1);
    assert_eq!(cat.default_interval(), Some(Interval::H1));
    assert_eq!(cat.interval_label(Interval::H1), Some("Hourly"));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(matches!(Config::from_toml("[indicator]\nwindow = 0"), Err(ConfigError::Invalid(_))));
    assert!(matches!(Config::from_toml("[filter]\niqr_multiplier = -1.0"), Err(ConfigError::Invalid(_))));
    assert!(matches!(Config::from_toml("[session]\nopen = \"25:99\""), Err(ConfigError::Invalid(_))));
    assert!(matches!(Config::from_toml("instruments = []"), Err(ConfigError::Invalid(_))));
    assert!(matches!(Config::from_toml("[general]\nrefresh_secs = \"soon\""), Err(ConfigError::ParseError(_))));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[range]\npadding_ratio = 0.25").unwrap();
    let cfg = Config::load(file.path()).unwrap();
    assert_eq!(cfg.range.padding_ratio, 0.25);

    let missing = file.path().with_extension("does-not-exist");
    assert!(matches!(Config::load(missing), Err(ConfigError::ReadError(_))));
}
