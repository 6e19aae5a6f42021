//! Volume-Weighted Average Price (VWAP), cumulative from the series start.
//!
//! vwap[i] = sum(typical * volume)[0..=i] / sum(volume)[0..=i], with
//! typical = (high + low + close) / 3. This is the lifetime-cumulative
//! variant, not a rolling window. While cumulative volume is zero the bar's
//! close stands in — a defined value instead of a 0/0 NaN.

/// Compute the cumulative VWAP over aligned high/low/close/volume slices.
pub fn vwap(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<f64> {
    assert!(
        high.len() == low.len() && low.len() == close.len() && close.len() == volume.len(),
        "VWAP inputs must be equal length"
    );

    let n = close.len();
    let mut out = Vec::with_capacity(n);
    let mut cum_pv = 0.0;
    let mut cum_volume = 0.0;

    for i in 0..n {
        let typical = (high[i] + low[i] + close[i]) / 3.0;
        cum_pv += typical * volume[i];
        cum_volume += volume[i];
        out.push(if cum_volume > 0.0 {
            cum_pv / cum_volume
        } else {
            close[i]
        });
    }

    out
}
