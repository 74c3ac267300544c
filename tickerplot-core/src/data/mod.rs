//! Data acquisition: provider abstraction, Alpha Vantage client, retry loop.

pub mod alpha_vantage;
pub mod fetch;
pub mod provider;

pub use alpha_vantage::AlphaVantageProvider;
pub use fetch::{fetch_with_retry, FetchError, RetryPolicy};
pub use provider::{DataError, DataProvider, FetchProgress, SilentProgress, StdoutProgress};
