//! Fetch stage — bounded retry around a data provider.
//!
//! Every error class is retried with the same fixed backoff; after the last
//! attempt fails, the stage fails fatally with the last provider error.
//! Backoff sleeps are blocking and observable as wall-clock delays.

use super::provider::{DataError, DataProvider, FetchProgress};
use crate::domain::Bar;
use std::time::Duration;
use thiserror::Error;

/// Retry policy for the fetch stage.
///
/// The default matches the production contract: 5 total attempts with a
/// fixed 60-second wait between them. Tests inject a zero backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(60),
        }
    }
}

/// Fatal fetch-stage error.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("data unavailable after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: DataError },
}

/// Fetch daily bars, retrying on any provider error.
///
/// Each failed attempt is reported through `progress`; the loop sleeps the
/// fixed backoff between attempts but not after the final failure.
pub fn fetch_with_retry(
    provider: &dyn DataProvider,
    symbol: &str,
    max_bars: usize,
    policy: &RetryPolicy,
    progress: &dyn FetchProgress,
) -> Result<Vec<Bar>, FetchError> {
    let mut last_error = None;

    for attempt in 1..=policy.max_attempts {
        match provider.fetch_daily(symbol, max_bars) {
            Ok(bars) => return Ok(bars),
            Err(e) => {
                progress.on_attempt_failed(symbol, attempt, policy.max_attempts, &e);
                last_error = Some(e);

                if attempt < policy.max_attempts {
                    progress.on_backoff(policy.backoff);
                    std::thread::sleep(policy.backoff);
                }
            }
        }
    }

    Err(FetchError::RetriesExhausted {
        attempts: policy.max_attempts,
        last: last_error
            .unwrap_or_else(|| DataError::Network("no fetch attempts were made".into())),
    })
}
