//! Chart rendering.

pub mod chart;

pub use chart::{render_chart, RenderError};
