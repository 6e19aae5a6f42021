//! Per-symbol candle series and the validated aligned batch.
//!
//! `SymbolSeries` is the raw fetch output: one symbol, chronological candles.
//! `SeriesBatch` is what the engine accepts: every member series has an
//! identical timestamp axis, checked at construction. The engine never
//! re-validates alignment mid-run; a batch that exists is aligned.

use super::Candle;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One symbol's chronologically ordered candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    pub symbol: String,
    pub candles: Vec<Candle>,
}

impl SymbolSeries {
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            symbol: symbol.into(),
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closing prices as a contiguous slice-friendly vector.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

/// Structured errors for batch construction.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch contains no series")]
    Empty,

    #[error("series for '{symbol}' is empty")]
    EmptySeries { symbol: String },

    #[error(
        "series for '{symbol}' has {actual} bars, expected {expected} (misaligned batch)"
    )]
    LengthMismatch {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    #[error("series for '{symbol}' diverges from the reference timestamp axis at bar {index}")]
    TimestampMismatch { symbol: String, index: usize },

    #[error("series share no common timestamps")]
    NoCommonTimestamps,
}

/// A collection of symbol series sharing one timestamp axis.
///
/// The first series is the reference axis; every other series must match it
/// bar for bar. Symbol order is the input order and is stable for the run —
/// the engine's iteration order (and therefore the buy-pass tie-break)
/// derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesBatch {
    series: Vec<SymbolSeries>,
}

impl SeriesBatch {
    /// Validate and wrap a set of series. Rejects empty batches, empty
    /// members, and any timestamp-axis divergence.
    pub fn try_new(series: Vec<SymbolSeries>) -> Result<Self, BatchError> {
        let reference = series.first().ok_or(BatchError::Empty)?;
        if reference.is_empty() {
            return Err(BatchError::EmptySeries {
                symbol: reference.symbol.clone(),
            });
        }
        let expected = reference.len();
        let axis: Vec<i64> = reference.candles.iter().map(|c| c.timestamp_ms).collect();

        for s in &series[1..] {
            if s.is_empty() {
                return Err(BatchError::EmptySeries {
                    symbol: s.symbol.clone(),
                });
            }
            if s.len() != expected {
                return Err(BatchError::LengthMismatch {
                    symbol: s.symbol.clone(),
                    expected,
                    actual: s.len(),
                });
            }
            for (i, candle) in s.candles.iter().enumerate() {
                if candle.timestamp_ms != axis[i] {
                    return Err(BatchError::TimestampMismatch {
                        symbol: s.symbol.clone(),
                        index: i,
                    });
                }
            }
        }

        Ok(Self { series })
    }

    /// Number of bars per symbol (the shared axis length).
    pub fn bar_count(&self) -> usize {
        self.series[0].len()
    }

    /// Number of symbols in the batch.
    pub fn symbol_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self) -> &[SymbolSeries] {
        &self.series
    }

    pub fn symbols(&self) -> Vec<String> {
        self.series.iter().map(|s| s.symbol.clone()).collect()
    }

    /// Timestamp of bar `i` on the shared axis.
    pub fn timestamp_ms(&self, i: usize) -> i64 {
        self.series[0].candles[i].timestamp_ms
    }

    pub fn into_series(self) -> Vec<SymbolSeries> {
        self.series
    }
}
