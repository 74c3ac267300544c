//! Chart output — close price and its moving average as a PNG line chart.

use crate::analysis::Derived;
use crate::domain::Bar;
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CHART_SIZE: (u32, u32) = (1000, 500);

/// Fatal render-stage error. A failed filesystem write surfaces here;
/// partial output is not cleaned up beyond what the backend does itself.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no bars to plot")]
    EmptySeries,

    #[error("chart rendering failed: {0}")]
    Backend(String),
}

/// Render the price chart and write it to `{ticker}_stock_plot.png` under
/// `out_dir`, overwriting any existing file. Returns the written path.
///
/// Two line series share the date axis: raw close (blue) and the 10-period
/// moving average (red), the latter drawn only where it is defined.
pub fn render_chart(
    bars: &[Bar],
    derived: &Derived,
    ticker: &str,
    out_dir: &Path,
) -> Result<PathBuf, RenderError> {
    if bars.is_empty() {
        return Err(RenderError::EmptySeries);
    }

    let path = out_dir.join(format!("{ticker}_stock_plot.png"));
    let (y_min, y_max) = price_bounds(bars, derived);
    let x_min = bars[0].date;
    let x_max = bars[bars.len() - 1].date;

    let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::Backend(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Stock Trends for {ticker}"),
            ("sans-serif", 32.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| RenderError::Backend(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price")
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m-%d").to_string())
        .x_label_style(
            TextStyle::from(("sans-serif", 14).into_font()).transform(FontTransform::Rotate90),
        )
        .draw()
        .map_err(|e| RenderError::Backend(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(
            bars.iter().map(|b| (b.date, b.close)),
            &BLUE,
        ))
        .map_err(|e| RenderError::Backend(e.to_string()))?
        .label("Close Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    let ma_points: Vec<(NaiveDate, f64)> = bars
        .iter()
        .zip(derived.ma_10.iter())
        .filter(|(_, ma)| !ma.is_nan())
        .map(|(bar, &ma)| (bar.date, ma))
        .collect();

    chart
        .draw_series(LineSeries::new(ma_points, &RED))
        .map_err(|e| RenderError::Backend(e.to_string()))?
        .label("10-Day Moving Avg")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| RenderError::Backend(e.to_string()))?;

    root.present()
        .map_err(|e| RenderError::Backend(e.to_string()))?;
    drop(chart);
    drop(root);

    Ok(path)
}

/// Y-axis range covering close and defined moving-average values, with 10%
/// padding. Degenerate flat ranges get a minimal spread so the axis builds.
fn price_bounds(bars: &[Bar], derived: &Derived) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in bars
        .iter()
        .map(|b| b.close)
        .chain(derived.ma_10.iter().copied().filter(|v| !v.is_nan()))
    {
        min = min.min(v);
        max = max.max(v);
    }

    let spread = (max - min).max(1e-8);
    let padding = spread * 0.1;
    ((min - padding).max(0.0), max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze, make_bars};

    #[test]
    fn writes_named_non_empty_png() {
        let dir = tempfile::tempdir().unwrap();
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = make_bars(&closes);
        let derived = analyze(&bars).unwrap();

        let path = render_chart(&bars, &derived, "TEST", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("TEST_stock_plot.png"));
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0, "plot file is empty");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let bars = make_bars(&[100.0; 30]);
        let derived = analyze(&bars).unwrap();

        let first = render_chart(&bars, &derived, "TEST", dir.path()).unwrap();
        let second = render_chart(&bars, &derived, "TEST", dir.path()).unwrap();
        assert_eq!(first, second);
        assert!(second.exists());
    }

    #[test]
    fn flat_series_renders() {
        // Flat closes give a degenerate y-range; the axis must still build.
        let dir = tempfile::tempdir().unwrap();
        let bars = make_bars(&[100.0; 12]);
        let derived = analyze(&bars).unwrap();
        assert!(render_chart(&bars, &derived, "FLAT", dir.path()).is_ok());
    }

    #[test]
    fn empty_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let derived = Derived {
            ma_10: vec![],
            volatility_10: vec![],
        };
        let err = render_chart(&[], &derived, "TEST", dir.path()).unwrap_err();
        assert!(matches!(err, RenderError::EmptySeries));
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let bars = make_bars(&[100.0; 12]);
        let derived = analyze(&bars).unwrap();
        let err = render_chart(&bars, &derived, "TEST", &missing).unwrap_err();
        assert!(matches!(err, RenderError::Backend(_)));
    }
}
