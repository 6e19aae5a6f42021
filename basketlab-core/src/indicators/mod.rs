//! Technical indicators — pure, stateless transforms over price/volume slices.
//!
//! Every function is length-preserving: the output has exactly the input's
//! length, with explicit neutral placeholders where a value is not yet
//! defined (RSI's neutral 50 prefix, for example). Nothing is truncated, so
//! indicator outputs stay index-aligned with the bars that produced them.
//!
//! Division-by-zero cases (zero average loss, zero cumulative volume) yield
//! defined sentinels, never an unguarded NaN that could leak into the
//! simulation's entry/exit decisions.

mod atr;
mod ema;
mod macd;
mod rsi;
mod vwap;

pub use atr::atr;
pub use ema::ema;
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use vwap::vwap;

#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-9;

#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "expected {expected}, got {actual} (epsilon {epsilon})"
    );
}
