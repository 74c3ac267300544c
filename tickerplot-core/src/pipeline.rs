//! Pipeline orchestration — fetch, analyze, render in sequence.
//!
//! The original workflow is a fixed three-node linear chain, so it is
//! expressed as direct function composition: each stage consumes the
//! previous stage's output by value, and the run record is assembled once at
//! the end. No stage error is swallowed; each either retries within its own
//! policy (fetch) or terminates the run.

use crate::analysis::{analyze, AnalysisError};
use crate::config::{ConfigError, RunConfig};
use crate::data::fetch::{fetch_with_retry, FetchError};
use crate::data::provider::{DataProvider, FetchProgress};
use crate::domain::Bar;
use crate::render::{render_chart, RenderError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from the pipeline, one variant per stage.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

/// Final state of a completed run. Created once per run and discarded with
/// the caller; nothing is persisted between runs.
#[derive(Debug)]
pub struct RunReport {
    pub ticker: String,
    pub bars: Vec<Bar>,
    pub ma_10: Vec<f64>,
    pub volatility_10: Vec<f64>,
    pub plot_path: PathBuf,
}

/// Run the full pipeline: fetch recent daily bars, derive the rolling
/// statistics, render the chart.
pub fn run(
    config: &RunConfig,
    provider: &dyn DataProvider,
    progress: &dyn FetchProgress,
) -> Result<RunReport, RunError> {
    let window = config.window_bars()?;
    let bars = fetch_with_retry(provider, &config.ticker, window, &config.retry, progress)?;
    let derived = analyze(&bars)?;
    let plot_path = render_chart(&bars, &derived, &config.ticker, &config.output_dir)?;

    Ok(RunReport {
        ticker: config.ticker.clone(),
        bars,
        ma_10: derived.ma_10,
        volatility_10: derived.volatility_10,
        plot_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{assert_approx, make_bars, DEFAULT_EPSILON};
    use crate::data::provider::{DataError, SilentProgress};
    use crate::data::RetryPolicy;
    use std::time::Duration;

    /// Provider stub serving a canned bar series.
    struct CannedProvider {
        closes: Vec<f64>,
    }

    impl DataProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn fetch_daily(&self, _symbol: &str, max_bars: usize) -> Result<Vec<Bar>, DataError> {
            let bars = make_bars(&self.closes);
            let skip = bars.len().saturating_sub(max_bars);
            Ok(bars.into_iter().skip(skip).collect())
        }
    }

    /// Provider stub that always fails.
    struct DownProvider;

    impl DataProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        fn fetch_daily(&self, _symbol: &str, _max_bars: usize) -> Result<Vec<Bar>, DataError> {
            Err(DataError::Network("connection refused".into()))
        }
    }

    fn test_config(ticker: &str, output_dir: &std::path::Path) -> RunConfig {
        RunConfig {
            ticker: ticker.into(),
            output_dir: output_dir.into(),
            retry: RetryPolicy {
                max_attempts: 5,
                backoff: Duration::ZERO,
            },
            ..RunConfig::default()
        }
    }

    #[test]
    fn end_to_end_constant_closes() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CannedProvider {
            closes: vec![100.0; 30],
        };
        let config = test_config("XYZ", dir.path());

        let report = run(&config, &provider, &SilentProgress).unwrap();

        assert_eq!(report.ticker, "XYZ");
        assert_eq!(report.bars.len(), 30);
        for i in 0..9 {
            assert!(report.ma_10[i].is_nan());
            assert!(report.volatility_10[i].is_nan());
        }
        for i in 9..30 {
            assert_approx(report.ma_10[i], 100.0, DEFAULT_EPSILON);
            assert_approx(report.volatility_10[i], 0.0, DEFAULT_EPSILON);
        }

        assert_eq!(report.plot_path, dir.path().join("XYZ_stock_plot.png"));
        assert!(std::fs::metadata(&report.plot_path).unwrap().len() > 0);
    }

    #[test]
    fn window_limits_fetched_bars() {
        let dir = tempfile::tempdir().unwrap();
        let provider = CannedProvider {
            closes: (0..60).map(|i| 100.0 + i as f64).collect(),
        };
        let config = RunConfig {
            period: "1w".into(),
            ..test_config("XYZ", dir.path())
        };

        let report = run(&config, &provider, &SilentProgress).unwrap();
        assert_eq!(report.bars.len(), 7);
        // Most recent bars survive the truncation.
        assert_eq!(report.bars.last().unwrap().close, 159.0);
    }

    #[test]
    fn provider_outage_exhausts_retries() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config("XYZ", dir.path());

        let err = run(&config, &DownProvider, &SilentProgress).unwrap_err();
        match err {
            RunError::Fetch(FetchError::RetriesExhausted { attempts, .. }) => {
                assert_eq!(attempts, 5)
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
        // No partial chart on fetch failure.
        assert!(!dir.path().join("XYZ_stock_plot.png").exists());
    }

    #[test]
    fn invalid_interval_fails_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            interval: "1h".into(),
            ..test_config("XYZ", dir.path())
        };

        let err = run(&config, &DownProvider, &SilentProgress).unwrap_err();
        assert!(matches!(err, RunError::Config(_)));
    }
}
