//! TOML-backed application configuration.
//!
//! Every detector section carries an `enabled` flag plus its numeric
//! parameters, with serde defaults so a config file only has to mention
//! what it overrides. Detector code receives these structs by value and
//! never mutates them.

use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid week_ending '{0}' (expected MON, TUE, WED, THU, FRI, SAT, or SUN)")]
    InvalidWeekday(String),
}

/// Parse a week-end anchor like "FRI" or "Friday" (case-insensitive).
pub fn parse_week_ending(value: &str) -> Result<Weekday, ConfigError> {
    let key: String = value.trim().to_ascii_uppercase().chars().take(3).collect();
    match key.as_str() {
        "MON" => Ok(Weekday::Mon),
        "TUE" => Ok(Weekday::Tue),
        "WED" => Ok(Weekday::Wed),
        "THU" => Ok(Weekday::Thu),
        "FRI" => Ok(Weekday::Fri),
        "SAT" => Ok(Weekday::Sat),
        "SUN" => Ok(Weekday::Sun),
        _ => Err(ConfigError::InvalidWeekday(value.to_string())),
    }
}

/// Which bar column marks a retrace back toward the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetraceMode {
    /// Close back inside or under the cloud top.
    Into,
    /// Close strictly under the cloud bottom.
    Below,
}

/// How the resistance level of the first breakout is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResistanceMode {
    /// Max high from the first breakout up to the retrace start.
    SwingHigh,
    /// The first breakout bar's high only.
    BarHigh,
}

/// Parameters for the cloud pullback-rebreak detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CloudRebreakConfig {
    pub enabled: bool,
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
    pub displacement: usize,
    pub retrace: RetraceMode,
    pub min_gap_bars: usize,
    pub min_retrace_bars: usize,
    pub require_open_cross: bool,
    pub resistance_mode: ResistanceMode,
    pub use_open_for_now: bool,
    pub bb_window: usize,
    pub bb_k: f64,
    pub retrace_vol_mult: f64,
}

impl Default for CloudRebreakConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
            displacement: 26,
            retrace: RetraceMode::Into,
            min_gap_bars: 3,
            min_retrace_bars: 1,
            require_open_cross: true,
            resistance_mode: ResistanceMode::SwingHigh,
            use_open_for_now: true,
            bb_window: 55,
            bb_k: 2.0,
            retrace_vol_mult: 2.0,
        }
    }
}

/// Parameters for the tenkan golden-cross combo detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TenkanCrossConfig {
    pub enabled: bool,
    pub tenkan: usize,
    pub kijun: usize,
    pub senkou_b: usize,
    pub displacement: usize,
    pub lookback_cross_bars: usize,
    pub dx_period: usize,
    pub ma_fast: usize,
    pub ma_mid: usize,
}

impl Default for TenkanCrossConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tenkan: 9,
            kijun: 26,
            senkou_b: 52,
            displacement: 26,
            lookback_cross_bars: 1,
            dx_period: 14,
            ma_fast: 5,
            ma_mid: 10,
        }
    }
}

/// Parameters for the uptrend pullback-bounce detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UptrendBounceConfig {
    pub enabled: bool,
    pub min_market_cap_krw: f64,
    pub min_close: f64,
    pub max_close: f64,
    pub min_daily_volume: u64,
    pub max_daily_volume: u64,
    pub weekly_lookback: usize,
    pub nhigh_weeks: usize,
    pub week_ending: String,
}

impl Default for UptrendBounceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_market_cap_krw: 100_000_000_000.0,
            min_close: 1_000.0,
            max_close: 99_999_999.0,
            min_daily_volume: 100_000,
            max_daily_volume: 999_999_999,
            weekly_lookback: 135,
            nhigh_weeks: 299,
            week_ending: "FRI".to_string(),
        }
    }
}

/// Parameters for the crash-then-MA-rebound detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CrashReboundConfig {
    pub enabled: bool,
    pub min_dod_close_change: f64,
    pub max_open_to_low_drawdown: f64,
    pub min_low_to_close_rebound: f64,
    pub near_ma_tolerance: f64,
    pub ma_periods: Vec<usize>,
}

impl Default for CrashReboundConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_dod_close_change: 0.01,
            max_open_to_low_drawdown: -0.03,
            min_low_to_close_rebound: 0.02,
            near_ma_tolerance: 0.005,
            ma_periods: vec![5, 20, 60],
        }
    }
}

/// All detector sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignalsConfig {
    pub cloud_pullback_rebreak: CloudRebreakConfig,
    pub tenkan_golden_cross: TenkanCrossConfig,
    pub uptrend_pullback_bounce: UptrendBounceConfig,
    pub crash_ma_rebound: CrashReboundConfig,
}

/// Scan-level parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanParams {
    /// How far back the data collaborator should reach when fetching.
    pub lookback_days: u32,
    /// Instruments with fewer bars than this are skipped as empty.
    pub min_history_bars: usize,
    /// Cap on the number of captions emitted per run.
    pub max_alerts_per_run: usize,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            lookback_days: 2200,
            min_history_bars: 260,
            max_alerts_per_run: 200,
        }
    }
}

/// Market filters applied when expanding the universe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UniverseParams {
    pub include_markets: Vec<String>,
    pub exclude_markets: Vec<String>,
}

impl Default for UniverseParams {
    fn default() -> Self {
        Self {
            include_markets: vec!["KOSPI".to_string(), "KOSDAQ".to_string()],
            exclude_markets: vec!["KONEX".to_string()],
        }
    }
}

/// The complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub scan: ScanParams,
    pub universe: UniverseParams,
    pub signals: SignalsConfig,
}

impl AppConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}
