//! Moving Average Convergence/Divergence (MACD).
//!
//! macd_line[i] = EMA(prices, 12)[i] - EMA(prices, 26)[i]
//! signal_line  = EMA(macd_line, 9)
//!
//! Both outputs are full-length; on the first bar both lines are zero (the
//! two EMAs share the same seed), so a strict crossover comparison starts
//! neutral rather than spuriously triggered.

use super::ema;

pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;

/// MACD line and its signal line, index-aligned with the input prices.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
}

/// Compute MACD with the standard 12/26/9 parameterization.
pub fn macd(prices: &[f64]) -> Macd {
    let fast = ema(prices, MACD_FAST);
    let slow = ema(prices, MACD_SLOW);

    let macd_line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal_line = ema(&macd_line, MACD_SIGNAL);

    Macd {
        macd_line,
        signal_line,
    }
}
