//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over the time-series source so the
//! pipeline and the retry loop can be exercised against stubs in tests.

use crate::domain::Bar;
use std::time::Duration;
use thiserror::Error;

/// Structured error types for a single fetch attempt.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("missing API key: pass --api-key or set ALPHAVANTAGE_API_KEY")]
    MissingApiKey,
}

/// Trait for daily time-series providers.
///
/// The retry loop sits above this trait — providers report each attempt's
/// outcome and never sleep or retry themselves.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the most recent daily OHLCV bars for a symbol.
    ///
    /// On success the result holds at most `max_bars` bars with unique dates
    /// in ascending order, in the canonical `Bar` schema.
    fn fetch_daily(&self, symbol: &str, max_bars: usize) -> Result<Vec<Bar>, DataError>;
}

/// Progress callback for the fetch retry loop.
pub trait FetchProgress {
    /// Called when a fetch attempt fails. `attempt` is 1-based.
    fn on_attempt_failed(&self, symbol: &str, attempt: u32, max_attempts: u32, error: &DataError);

    /// Called before the retry loop sleeps between attempts.
    fn on_backoff(&self, wait: Duration);
}

/// Progress reporter that prints each failed attempt to stdout.
pub struct StdoutProgress;

impl FetchProgress for StdoutProgress {
    fn on_attempt_failed(&self, symbol: &str, attempt: u32, max_attempts: u32, error: &DataError) {
        println!("Error fetching {symbol}: {error} (attempt {attempt}/{max_attempts})");
    }

    fn on_backoff(&self, wait: Duration) {
        println!("Waiting {} seconds before retry...", wait.as_secs());
    }
}

/// Progress reporter that stays silent. Used where attempt noise is unwanted.
pub struct SilentProgress;

impl FetchProgress for SilentProgress {
    fn on_attempt_failed(&self, _: &str, _: u32, _: u32, _: &DataError) {}
    fn on_backoff(&self, _: Duration) {}
}
