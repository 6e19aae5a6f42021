//! Bar buffer codec — packs symbol series into one flat `f64` record stream.
//!
//! Layout: per retained symbol, candles are appended as fixed 6-field records
//! `[timestamp, open, high, low, close, volume]`, contiguously. Two parallel
//! arrays carry the symbol ids and per-symbol record counts, in pack order.
//! The base offset of series `k` is `RECORD_FIELDS * sum(points[..k])`.
//!
//! Empty series are skipped at encode time — a zero-length slot is never
//! represented inside the buffer, and a zero entry in `points_per_symbol` is
//! a decode error. Round-trip is bit-for-bit lossless for the carried values.

use crate::domain::{Candle, SymbolSeries};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields per packed record: timestamp, open, high, low, close, volume.
pub const RECORD_FIELDS: usize = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("buffer length {len} is not a multiple of {RECORD_FIELDS}")]
    RaggedBuffer { len: usize },

    #[error("symbol array has {symbols} entries but points array has {points}")]
    IndexArrayMismatch { symbols: usize, points: usize },

    #[error(
        "points arrays claim {claimed} values but buffer holds {actual} \
         (sum of points x {RECORD_FIELDS} must equal buffer length)"
    )]
    LengthMismatch { claimed: usize, actual: usize },

    #[error("symbol '{symbol}' has a zero record count (empty series are never packed)")]
    ZeroLengthSeries { symbol: String },
}

/// A packed batch: the flat buffer plus its two parallel index arrays.
///
/// This is the unit that crosses the fetch/compute boundary. It moves by
/// value over the worker channel — one bulk transfer, no per-field
/// serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedBatch {
    pub buffer: Vec<f64>,
    pub symbols: Vec<String>,
    pub points_per_symbol: Vec<usize>,
}

/// Pack a collection of series, skipping empty ones, preserving input order.
pub fn encode(series: &[SymbolSeries]) -> EncodedBatch {
    let total_points: usize = series.iter().map(|s| s.len()).sum();
    let mut buffer = Vec::with_capacity(total_points * RECORD_FIELDS);
    let mut symbols = Vec::new();
    let mut points_per_symbol = Vec::new();

    for s in series {
        if s.is_empty() {
            continue;
        }
        for candle in &s.candles {
            buffer.push(candle.timestamp_ms as f64);
            buffer.push(candle.open);
            buffer.push(candle.high);
            buffer.push(candle.low);
            buffer.push(candle.close);
            buffer.push(candle.volume);
        }
        symbols.push(s.symbol.clone());
        points_per_symbol.push(s.len());
    }

    EncodedBatch {
        buffer,
        symbols,
        points_per_symbol,
    }
}

impl EncodedBatch {
    /// Check the structural invariants without materializing any series.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.buffer.len() % RECORD_FIELDS != 0 {
            return Err(CodecError::RaggedBuffer {
                len: self.buffer.len(),
            });
        }
        if self.symbols.len() != self.points_per_symbol.len() {
            return Err(CodecError::IndexArrayMismatch {
                symbols: self.symbols.len(),
                points: self.points_per_symbol.len(),
            });
        }
        if let Some(k) = self.points_per_symbol.iter().position(|&p| p == 0) {
            return Err(CodecError::ZeroLengthSeries {
                symbol: self.symbols[k].clone(),
            });
        }
        let claimed: usize = self.points_per_symbol.iter().sum();
        if claimed * RECORD_FIELDS != self.buffer.len() {
            return Err(CodecError::LengthMismatch {
                claimed,
                actual: self.buffer.len() / RECORD_FIELDS,
            });
        }
        Ok(())
    }

    /// Total packed record count across all symbols.
    pub fn total_points(&self) -> usize {
        self.points_per_symbol.iter().sum()
    }

    /// Bounds-checked view of symbol `k`'s records.
    ///
    /// Base offset is computed from the preceding symbols' counts; never
    /// index the raw buffer directly.
    pub fn records(&self, k: usize) -> Result<&[f64], CodecError> {
        self.validate()?;
        let base: usize = self.points_per_symbol[..k].iter().sum::<usize>() * RECORD_FIELDS;
        let len = self.points_per_symbol[k] * RECORD_FIELDS;
        Ok(&self.buffer[base..base + len])
    }

    /// Reconstruct the series list. The inverse of [`encode`].
    pub fn decode(&self) -> Result<Vec<SymbolSeries>, CodecError> {
        self.validate()?;

        let mut out = Vec::with_capacity(self.symbols.len());
        let mut offset = 0usize;

        for (symbol, &points) in self.symbols.iter().zip(&self.points_per_symbol) {
            let mut candles = Vec::with_capacity(points);
            for record in self.buffer[offset..offset + points * RECORD_FIELDS]
                .chunks_exact(RECORD_FIELDS)
            {
                candles.push(Candle {
                    timestamp_ms: record[0] as i64,
                    open: record[1],
                    high: record[2],
                    low: record[3],
                    close: record[4],
                    volume: record[5],
                });
            }
            offset += points * RECORD_FIELDS;
            out.push(SymbolSeries::new(symbol.clone(), candles));
        }

        Ok(out)
    }
}
