//! TickerPlot CLI — fetch recent daily prices for a ticker, compute a
//! 10-day moving average and rolling volatility, and save a price chart.
//!
//! With no arguments this runs the demo invocation: AAPL over the last
//! month of daily bars, chart written to the current directory.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tickerplot_core::config::RunConfig;
use tickerplot_core::data::{AlphaVantageProvider, StdoutProgress};
use tickerplot_core::pipeline;

#[derive(Parser)]
#[command(
    name = "tickerplot",
    about = "Fetch daily stock prices, derive rolling statistics, and render a chart"
)]
struct Cli {
    /// Ticker symbol.
    #[arg(default_value = "AAPL")]
    ticker: String,

    /// History window: 1w, 2w, 1mo, 3mo.
    #[arg(long, default_value = "1mo")]
    period: String,

    /// Bar interval. Only '1d' is supported.
    #[arg(long, default_value = "1d")]
    interval: String,

    /// Directory the chart PNG is written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Alpha Vantage API key. Falls back to the ALPHAVANTAGE_API_KEY
    /// environment variable.
    #[arg(long)]
    api_key: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .or_else(|| std::env::var("ALPHAVANTAGE_API_KEY").ok())
        .unwrap_or_default();
    let provider = AlphaVantageProvider::new(api_key)?;

    let config = RunConfig {
        ticker: cli.ticker,
        period: cli.period,
        interval: cli.interval,
        output_dir: cli.output_dir,
        ..RunConfig::default()
    };

    let report = pipeline::run(&config, &provider, &StdoutProgress)?;

    println!("Analysis completed for {}", report.ticker);
    let sample: Vec<String> = report
        .bars
        .iter()
        .take(5)
        .map(|b| format!("{:.2}", b.close))
        .collect();
    println!("Sample closing prices: [{}]...", sample.join(", "));
    println!("Plot saved at: {}", report.plot_path.display());

    Ok(())
}
