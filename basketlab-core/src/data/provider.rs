//! Data provider trait and structured error types.
//!
//! The trait abstracts over data sources (chart API, synthetic) so the
//! runner can swap implementations and tests can run offline.

use crate::domain::SymbolSeries;
use chrono::NaiveDate;
use thiserror::Error;

/// Structured errors for data retrieval.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormat(String),

    #[error("no bars for '{symbol}' in the requested range")]
    EmptyRange { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// A source of historical candles for one symbol over a date range.
///
/// Implementations must be `Send + Sync`: the runner fans fetches out across
/// a thread pool, one symbol per task.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch candles for a symbol over an inclusive date range, in
    /// chronological order. An empty result is an error, not an empty
    /// series — empty series never enter a batch.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SymbolSeries, DataError>;
}
