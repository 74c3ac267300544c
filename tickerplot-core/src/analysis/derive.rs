//! Derived series — moving average and rolling volatility of close.

use super::rolling::{pct_change, rolling_mean, rolling_stddev};
use crate::domain::Bar;
use thiserror::Error;

/// Rolling window length shared by both derived series.
pub const WINDOW: usize = 10;

/// Fatal analysis-stage error. Never retried: it indicates a contract
/// violation by the fetch stage.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Derived columns, index-aligned with the input bars.
///
/// Entries are NaN where the statistic is undefined: the first `WINDOW - 1`
/// rows for both series, by definition of a trailing 10-period window.
#[derive(Debug, Clone)]
pub struct Derived {
    pub ma_10: Vec<f64>,
    pub volatility_10: Vec<f64>,
}

/// Compute the 10-period moving average of close and the 10-period rolling
/// volatility (sample standard deviation of daily percentage returns).
///
/// Pure and deterministic: reads only the close column, performs no I/O,
/// and yields identical output when run repeatedly over the same bars.
pub fn analyze(bars: &[Bar]) -> Result<Derived, AnalysisError> {
    if bars.is_empty() {
        return Err(AnalysisError::MalformedInput("empty price series".into()));
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    if let Some(i) = closes.iter().position(|c| !c.is_finite()) {
        return Err(AnalysisError::MalformedInput(format!(
            "close on {} is not a finite number",
            bars[i].date
        )));
    }

    Ok(Derived {
        ma_10: rolling_mean(&closes, WINDOW),
        volatility_10: rolling_stddev(&pct_change(&closes), WINDOW),
    })
}
