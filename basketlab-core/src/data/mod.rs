//! Market data: provider trait, HTTP chart-API provider, synthetic
//! generator, and multi-symbol timestamp alignment.

pub mod align;
mod chart_api;
mod provider;
mod synthetic;

pub use chart_api::ChartApiProvider;
pub use provider::{DataError, MarketDataProvider};
pub use synthetic::SyntheticProvider;
