//! Multi-symbol timestamp alignment.
//!
//! The engine steps one shared index across every symbol, so all series must
//! agree on their timestamp axis bar for bar. Providers disagree at the
//! edges (listing dates, venue holidays), so ingestion aligns by
//! *intersection*: only timestamps present in every series survive. The
//! packed buffer has no void-bar representation, which rules out the
//! union/NaN-fill alternative.

use crate::domain::{BatchError, SeriesBatch, SymbolSeries};
use std::collections::BTreeSet;

/// Restrict every series to the timestamps all of them share, then build a
/// validated batch. Order of symbols and of surviving bars is preserved.
pub fn intersect(series: Vec<SymbolSeries>) -> Result<SeriesBatch, BatchError> {
    if series.is_empty() {
        return Err(BatchError::Empty);
    }

    let mut common: BTreeSet<i64> = series[0]
        .candles
        .iter()
        .map(|c| c.timestamp_ms)
        .collect();
    for s in &series[1..] {
        let axis: BTreeSet<i64> = s.candles.iter().map(|c| c.timestamp_ms).collect();
        common = common.intersection(&axis).copied().collect();
        if common.is_empty() {
            return Err(BatchError::NoCommonTimestamps);
        }
    }

    let aligned = series
        .into_iter()
        .map(|s| {
            let candles = s
                .candles
                .into_iter()
                .filter(|c| common.contains(&c.timestamp_ms))
                .collect();
            SymbolSeries::new(s.symbol, candles)
        })
        .collect();

    SeriesBatch::try_new(aligned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;

    fn candle(ts: i64, close: f64) -> Candle {
        Candle {
            timestamp_ms: ts,
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000.0,
        }
    }

    fn series(symbol: &str, timestamps: &[i64]) -> SymbolSeries {
        let candles = timestamps.iter().map(|&ts| candle(ts, 100.0)).collect();
        SymbolSeries::new(symbol, candles)
    }

    #[test]
    fn keeps_only_shared_timestamps() {
        let batch = intersect(vec![
            series("SPY", &[1, 2, 3, 4]),
            series("QQQ", &[2, 3, 4, 5]),
        ])
        .unwrap();

        assert_eq!(batch.bar_count(), 3);
        assert_eq!(batch.timestamp_ms(0), 2);
        assert_eq!(batch.timestamp_ms(2), 4);
    }

    #[test]
    fn identical_axes_pass_through() {
        let batch = intersect(vec![
            series("SPY", &[10, 20, 30]),
            series("QQQ", &[10, 20, 30]),
        ])
        .unwrap();
        assert_eq!(batch.bar_count(), 3);
    }

    #[test]
    fn disjoint_axes_are_rejected() {
        let err = intersect(vec![series("SPY", &[1, 2]), series("QQQ", &[3, 4])]).unwrap_err();
        assert!(matches!(err, BatchError::NoCommonTimestamps));
    }

    #[test]
    fn single_series_is_its_own_axis() {
        let batch = intersect(vec![series("SPY", &[5, 6, 7])]).unwrap();
        assert_eq!(batch.bar_count(), 3);
        assert_eq!(batch.symbol_count(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(intersect(vec![]), Err(BatchError::Empty)));
    }
}
