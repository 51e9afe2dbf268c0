// File: crates/livechart-core/src/config.rs
// Summary: TOML-backed configuration with defaults for every setting.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::catalog::{Catalog, Instrument, IntervalEntry};
use crate::filter::DEFAULT_IQR_MULTIPLIER;
use crate::indicator::DEFAULT_SMA_WINDOW;
use crate::range::DEFAULT_PADDING_RATIO;

/// File looked up in the working directory by `Config::load_default`.
pub const DEFAULT_CONFIG_FILE: &str = "livechart.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub filter: FilterConfig,
    pub indicator: IndicatorConfig,
    pub range: RangeConfig,
    pub session: SessionConfig,
    pub instruments: Vec<Instrument>,
    pub intervals: Vec<IntervalEntry>,
}

impl Default for Config {
    fn default() -> Self {
        let catalog = Catalog::builtin();
        Self {
            general: GeneralConfig::default(),
            filter: FilterConfig::default(),
            indicator: IndicatorConfig::default(),
            range: RangeConfig::default(),
            session: SessionConfig::default(),
            instruments: catalog.instruments,
            intervals: catalog.intervals,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `./livechart.toml` when present and valid, defaults otherwise.
    pub fn load_default() -> Self {
        match Self::load(DEFAULT_CONFIG_FILE) {
            Ok(config) => config,
            Err(ConfigError::ReadError(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring {}: {}", DEFAULT_CONFIG_FILE, e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.indicator.window == 0 {
            return Err(ConfigError::Invalid("indicator.window must be at least 1".into()));
        }
        if !(self.filter.iqr_multiplier.is_finite() && self.filter.iqr_multiplier >= 0.0) {
            return Err(ConfigError::Invalid("filter.iqr_multiplier must be a non-negative number".into()));
        }
        if !(self.range.padding_ratio.is_finite() && self.range.padding_ratio >= 0.0) {
            return Err(ConfigError::Invalid("range.padding_ratio must be a non-negative number".into()));
        }
        if self.general.refresh_secs == 0 {
            return Err(ConfigError::Invalid("general.refresh_secs must be at least 1".into()));
        }
        self.session.open_time()?;
        self.session.close_time()?;
        if self.instruments.is_empty() || self.intervals.is_empty() {
            return Err(ConfigError::Invalid("instrument and interval catalogs must not be empty".into()));
        }
        Ok(())
    }

    pub fn catalog(&self) -> Catalog {
        Catalog { instruments: self.instruments.clone(), intervals: self.intervals.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Timer cadence in seconds.
    pub refresh_secs: u64,
    /// Theme preset name, see `theme::find`.
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { refresh_secs: 60, theme: "dark".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub iqr_multiplier: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { iqr_multiplier: DEFAULT_IQR_MULTIPLIER }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub window: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self { window: DEFAULT_SMA_WINDOW }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub padding_ratio: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self { padding_ratio: DEFAULT_PADDING_RATIO }
    }
}

/// Exchange session used to shade non-trading hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Market open, `HH:MM`.
    pub open: String,
    /// Market close, `HH:MM`.
    pub close: String,
    /// Offset from UTC of the clock `open`/`close` are expressed in; also
    /// decides where calendar days start.
    pub utc_offset_minutes: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { open: "16:30".to_string(), close: "23:00".to_string(), utc_offset_minutes: 0 }
    }
}

impl SessionConfig {
    pub fn open_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_hhmm(&self.open)
    }

    pub fn close_time(&self) -> Result<NaiveTime, ConfigError> {
        parse_hhmm(&self.close)
    }
}

fn parse_hhmm(s: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| ConfigError::Invalid(format!("session time '{}': {}", s, e)))
}
