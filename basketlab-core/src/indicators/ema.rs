//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[i] = values[i] * k + EMA[i-1] * (1 - k), k = 2 / (period + 1).
//! Seed: EMA[0] = values[0] — the series starts live from the first bar, so
//! there is no undefined prefix.

/// Compute the EMA of a series. Output length equals input length.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "EMA period must be >= 1");

    let n = values.len();
    let mut out = Vec::with_capacity(n);
    if n == 0 {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut prev = values[0];
    out.push(prev);

    for &v in &values[1..] {
        prev = v * k + prev * (1.0 - k);
        out.push(prev);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_period_1_equals_input() {
        let result = ema(&[100.0, 200.0, 300.0], 1);
        assert_eq!(result, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn ema_2_known_values() {
        // k = 2/3
        // ema[0] = 10
        // ema[1] = 20 * 2/3 + 10 * 1/3 = 16.666...
        // ema[2] = 30 * 2/3 + 16.666 * 1/3 = 25.555...
        let result = ema(&[10.0, 20.0, 30.0], 2);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 50.0 / 3.0, DEFAULT_EPSILON);
        assert_approx(result[2], 230.0 / 9.0, DEFAULT_EPSILON);
        // 3-decimal view: [10.0, 16.667, 25.556]
        assert_approx((result[1] * 1000.0).round() / 1000.0, 16.667, 1e-12);
        assert_approx((result[2] * 1000.0).round() / 1000.0, 25.556, 1e-12);
    }

    #[test]
    fn ema_is_length_preserving() {
        assert_eq!(ema(&[], 5).len(), 0);
        assert_eq!(ema(&[1.0], 5).len(), 1);
        assert_eq!(ema(&[1.0; 100], 5).len(), 100);
    }

    #[test]
    fn ema_of_constant_series_is_constant() {
        let result = ema(&[42.0; 10], 4);
        for v in result {
            assert_approx(v, 42.0, DEFAULT_EPSILON);
        }
    }
}
