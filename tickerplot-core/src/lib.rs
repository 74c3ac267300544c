//! TickerPlot core — fetch daily bars, derive rolling statistics, render a chart.
//!
//! One batch run is a fixed linear pipeline:
//! - `data`: fetch the most recent daily OHLCV bars for a ticker, with a
//!   bounded retry loop around the provider call
//! - `analysis`: derive a 10-period moving average of close and a 10-period
//!   rolling volatility of daily returns
//! - `render`: write a PNG line chart named after the ticker
//!
//! `pipeline::run` wires the stages together; each stage hands its output to
//! the next by value, and the assembled `RunReport` is returned to the caller.

pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod pipeline;
pub mod render;
