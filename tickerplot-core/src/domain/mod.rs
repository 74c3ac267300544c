//! Domain types.

pub mod bar;

pub use bar::Bar;

/// Ticker symbol type alias.
pub type Symbol = String;
