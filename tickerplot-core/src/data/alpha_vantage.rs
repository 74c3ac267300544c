//! Alpha Vantage data provider.
//!
//! Fetches daily OHLCV bars from the TIME_SERIES_DAILY endpoint with
//! `outputsize=compact` (the 100 most recent bars). The provider's numbered
//! column names ("1. open" .. "5. volume") are normalized into the canonical
//! `Bar` schema here, and never leak past this module.
//!
//! Alpha Vantage signals failures inside HTTP 200 bodies: "Error Message"
//! for bad symbols, "Note"/"Information" for rate limiting.

use super::provider::{DataError, DataProvider};
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Number of bars in a compact response — the widest window we can serve.
pub const COMPACT_BARS: usize = 100;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Alpha Vantage TIME_SERIES_DAILY response.
///
/// Exactly one of the fields is populated: the series on success, one of the
/// three message fields on failure.
#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<NaiveDate, DailyQuote>>,

    #[serde(rename = "Error Message")]
    error_message: Option<String>,

    #[serde(rename = "Note")]
    note: Option<String>,

    #[serde(rename = "Information")]
    information: Option<String>,
}

/// One day of quotes. All fields arrive as JSON strings.
#[derive(Debug, Deserialize)]
struct DailyQuote {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Alpha Vantage data provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    api_key: String,
}

impl AlphaVantageProvider {
    /// Build a provider. Fails with `MissingApiKey` on an empty key so the
    /// error surfaces before any network attempt.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DataError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DataError::MissingApiKey);
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("tickerplot/0.1")
            .build()
            .expect("failed to build HTTP client");

        Ok(Self { client, api_key })
    }

    fn query_url(&self, symbol: &str) -> String {
        format!(
            "{BASE_URL}?function=TIME_SERIES_DAILY&symbol={symbol}\
             &outputsize=compact&apikey={key}",
            key = self.api_key
        )
    }

    /// Parse a response body into canonical bars: normalize the numbered
    /// columns, keep ascending date order, truncate to the most recent
    /// `max_bars`.
    fn parse_response(
        symbol: &str,
        resp: DailyResponse,
        max_bars: usize,
    ) -> Result<Vec<Bar>, DataError> {
        if let Some(msg) = resp.error_message {
            // Alpha Vantage reports unknown symbols and bad keys the same way.
            return Err(DataError::SymbolNotFound {
                symbol: format!("{symbol} ({msg})"),
            });
        }
        if let Some(msg) = resp.note.or(resp.information) {
            return Err(DataError::RateLimited(msg));
        }

        let series = resp.series.ok_or_else(|| {
            DataError::MalformedResponse("no time series in response".into())
        })?;

        // BTreeMap keys give unique dates in ascending order.
        let mut bars = Vec::with_capacity(series.len());
        for (date, quote) in series {
            bars.push(Bar {
                date,
                open: parse_price(&quote.open, "open", date)?,
                high: parse_price(&quote.high, "high", date)?,
                low: parse_price(&quote.low, "low", date)?,
                close: parse_price(&quote.close, "close", date)?,
                volume: quote.volume.parse().map_err(|_| {
                    DataError::MalformedResponse(format!(
                        "unparseable volume '{}' on {date}",
                        quote.volume
                    ))
                })?,
            });
        }

        if bars.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if bars.len() > max_bars {
            bars.drain(..bars.len() - max_bars);
        }

        Ok(bars)
    }
}

fn parse_price(raw: &str, field: &str, date: NaiveDate) -> Result<f64, DataError> {
    raw.parse().map_err(|_| {
        DataError::MalformedResponse(format!("unparseable {field} '{raw}' on {date}"))
    })
}

impl DataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn fetch_daily(&self, symbol: &str, max_bars: usize) -> Result<Vec<Bar>, DataError> {
        let url = self.query_url(symbol);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(DataError::Network(format!("HTTP {status} for {symbol}")));
        }

        let body: DailyResponse = resp.json().map_err(|e| {
            DataError::MalformedResponse(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, body, max_bars)
    }
}
