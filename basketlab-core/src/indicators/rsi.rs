//! Relative Strength Index (RSI) with Wilder smoothing.
//!
//! The first `period` entries are the neutral 50.0 — the oscillator has no
//! opinion until a full lookback of deltas exists. Seed averages come from
//! the first `period` deltas; from there Wilder smoothing applies:
//! avg = (avg * (period - 1) + current) / period.
//! Edge case: avg_loss == 0 means rs -> infinity, reported as RSI 100.

/// Compute the RSI of a price series. Output length equals input length.
pub fn rsi(prices: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "RSI period must be >= 1");

    let n = prices.len();
    let mut out = vec![50.0; n];
    if n < period + 1 {
        return out;
    }

    // Seed: average gain/loss over the first `period` deltas.
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let delta = prices[i] - prices[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss -= delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = rsi_value(avg_gain, avg_loss);

    for i in (period + 1)..n {
        let delta = prices[i] - prices[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };

        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;

        out[i] = rsi_value(avg_gain, avg_loss);
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn neutral_prefix_is_50() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&prices, 14);
        for &v in &result[..14] {
            assert_eq!(v, 50.0);
        }
        assert_ne!(result[14], 50.0);
    }

    #[test]
    fn short_series_stays_neutral() {
        let result = rsi(&[100.0, 101.0, 102.0], 14);
        assert_eq!(result, vec![50.0; 3]);
    }

    #[test]
    fn all_gains_pin_at_100() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let result = rsi(&prices, 3);
        // No losses ever: avg_loss stays 0 and RSI pins at 100.
        for &v in &result[3..] {
            assert_approx(v, 100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn all_losses_pin_at_0() {
        let prices: Vec<f64> = (0..10).map(|i| 100.0 - i as f64).collect();
        let result = rsi(&prices, 3);
        for &v in &result[3..] {
            assert_approx(v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn seed_value_matches_hand_computation() {
        // Deltas over period 3: +0.34, -0.25, -0.48
        // avg_gain = 0.34/3, avg_loss = 0.73/3
        // rsi[3] = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        let result = rsi(&[44.0, 44.34, 44.09, 43.61], 3);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn output_stays_in_bounds() {
        let prices = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0, 91.0];
        for v in rsi(&prices, 3) {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
        }
    }
}
