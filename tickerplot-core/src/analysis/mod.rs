//! Rolling analysis over the fetched price series.
//!
//! Pure functions: bars in, numeric series out. The shared convention is
//! that outputs have the same length as the input, with `f64::NAN` at every
//! index where the statistic is undefined.

pub mod derive;
pub mod rolling;

pub use derive::{analyze, AnalysisError, Derived, WINDOW};

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV around each close: open = previous close (or the
/// close itself for the first bar), high/low bracket open and close, volume
/// constant. Dates count forward from 2024-01-02.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<crate::domain::Bar> {
    use crate::domain::Bar;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for analysis tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
