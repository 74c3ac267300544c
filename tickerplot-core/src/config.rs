//! Run configuration — ticker, window parameters, output location.
//!
//! `period` and `interval` are honored, not carried as dead weight: the
//! period resolves to the number of recent daily bars to fetch, and only the
//! daily interval is accepted.

use crate::data::alpha_vantage::COMPACT_BARS;
use crate::data::fetch::RetryPolicy;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ticker must be non-empty")]
    EmptyTicker,

    #[error("unknown period '{0}'. Supported: 1w, 2w, 1mo, 3mo")]
    UnknownPeriod(String),

    #[error("unsupported interval '{0}'. Only daily bars ('1d') are supported")]
    UnsupportedInterval(String),
}

/// Parameters for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub ticker: String,
    /// History window, e.g. "1mo". Resolves to a bar count via `window_bars`.
    pub period: String,
    /// Bar interval. Only "1d" is accepted.
    pub interval: String,
    /// Directory the chart PNG is written to.
    pub output_dir: PathBuf,
    pub retry: RetryPolicy,
}

impl Default for RunConfig {
    /// The demo invocation: AAPL over the last month of daily bars, chart
    /// written to the current directory.
    fn default() -> Self {
        Self {
            ticker: "AAPL".into(),
            period: "1mo".into(),
            interval: "1d".into(),
            output_dir: PathBuf::from("."),
            retry: RetryPolicy::default(),
        }
    }
}

impl RunConfig {
    /// Validate the config and resolve the fetch window in bars.
    pub fn window_bars(&self) -> Result<usize, ConfigError> {
        if self.ticker.trim().is_empty() {
            return Err(ConfigError::EmptyTicker);
        }
        if self.interval != "1d" {
            return Err(ConfigError::UnsupportedInterval(self.interval.clone()));
        }
        parse_period(&self.period)
    }
}

/// Map a period string to a bar-count window, capped at the provider's
/// compact output size.
pub fn parse_period(period: &str) -> Result<usize, ConfigError> {
    let bars = match period.to_lowercase().as_str() {
        "1w" => 7,
        "2w" => 14,
        "1mo" | "1month" => 30,
        "3mo" | "3months" => 90,
        _ => return Err(ConfigError::UnknownPeriod(period.to_string())),
    };
    Ok(bars.min(COMPACT_BARS))
}
