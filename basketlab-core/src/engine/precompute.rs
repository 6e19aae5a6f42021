//! Per-symbol indicator precompute.
//!
//! All indicator series are computed once per symbol before stepping begins;
//! the step loop only reads aligned values by index.

use crate::domain::SymbolSeries;
use crate::indicators::{atr, macd, rsi, vwap, Macd};

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;

/// The full indicator panel for one symbol, index-aligned with its candles.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub rsi: Vec<f64>,
    pub macd: Macd,
    pub atr: Vec<f64>,
    pub vwap: Vec<f64>,
}

impl IndicatorSet {
    pub fn compute(series: &SymbolSeries) -> Self {
        let closes = series.closes();
        let highs = series.highs();
        let lows = series.lows();
        let volumes = series.volumes();

        Self {
            rsi: rsi(&closes, RSI_PERIOD),
            macd: macd(&closes),
            atr: atr(&highs, &lows, &closes, ATR_PERIOD),
            vwap: vwap(&highs, &lows, &closes, &volumes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;

    fn sample_series(n: usize) -> SymbolSeries {
        let candles = (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 5.0;
                Candle {
                    timestamp_ms: 86_400_000 * i as i64,
                    open: close - 0.2,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 10_000.0,
                }
            })
            .collect();
        SymbolSeries::new("SPY", candles)
    }

    #[test]
    fn all_panels_are_full_length() {
        let series = sample_series(60);
        let set = IndicatorSet::compute(&series);
        assert_eq!(set.rsi.len(), 60);
        assert_eq!(set.macd.macd_line.len(), 60);
        assert_eq!(set.macd.signal_line.len(), 60);
        assert_eq!(set.atr.len(), 60);
        assert_eq!(set.vwap.len(), 60);
    }
}
