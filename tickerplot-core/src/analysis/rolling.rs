//! Rolling window statistics.
//!
//! All functions return a vector of the same length as the input with
//! `f64::NAN` for the warmup indices (the first `window - 1` positions).

/// Trailing-window arithmetic mean.
///
/// A NaN anywhere in the window makes that output NaN.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let mut out = vec![f64::NAN; values.len()];

    for (i, w) in values.windows(window).enumerate() {
        if w.iter().any(|v| v.is_nan()) {
            continue;
        }
        out[i + window - 1] = w.iter().sum::<f64>() / window as f64;
    }

    out
}

/// Period-over-period percentage change: `v[i] / v[i-1] - 1`.
///
/// Undefined (NaN) at index 0 and wherever the denominator is zero or NaN.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];

    for i in 1..values.len() {
        let prev = values[i - 1];
        if prev == 0.0 {
            continue;
        }
        out[i] = values[i] / prev - 1.0;
    }

    out
}

/// Trailing-window sample (n-1) standard deviation.
///
/// Undefined entries in the window are excluded from the computation rather
/// than poisoning it, so the structural leading NaN of a pct-change series
/// does not delay the first output past the warmup. At least two defined
/// observations are required.
pub fn rolling_stddev(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let mut out = vec![f64::NAN; values.len()];

    for (i, w) in values.windows(window).enumerate() {
        let defined: Vec<f64> = w.iter().copied().filter(|v| !v.is_nan()).collect();
        if defined.len() < 2 {
            continue;
        }
        let count = defined.len() as f64;
        let mean = defined.iter().sum::<f64>() / count;
        let variance =
            defined.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1.0);
        out[i + window - 1] = variance.sqrt();
    }

    out
}
