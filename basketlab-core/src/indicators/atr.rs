//! Average True Range (ATR).
//!
//! tr[0] = high[0] - low[0]; for i > 0 the true range is the largest of the
//! bar range, |high - prev_close|, and |low - prev_close|. The TR series is
//! then smoothed with the EMA, so ATR is full-length and defined from bar 0.

use super::ema;

/// Compute the ATR over aligned high/low/close slices.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<f64> {
    assert!(
        high.len() == low.len() && low.len() == close.len(),
        "ATR inputs must be equal length"
    );

    let n = close.len();
    if n == 0 {
        return Vec::new();
    }

    let mut tr = Vec::with_capacity(n);
    tr.push(high[0] - low[0]);
    for i in 1..n {
        let range = high[i] - low[i];
        let up_gap = (high[i] - close[i - 1]).abs();
        let down_gap = (low[i] - close[i - 1]).abs();
        tr.push(range.max(up_gap).max(down_gap));
    }

    ema(&tr, period)
}
