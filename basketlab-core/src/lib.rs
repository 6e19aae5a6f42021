//! Basketlab Core — the multi-symbol backtesting kernel.
//!
//! This crate contains everything with numerical-correctness requirements:
//! - Domain types (candles, series, positions, trades, equity points)
//! - Bar buffer codec (flat 6-field records for crossing the compute boundary)
//! - Indicator library (EMA, RSI, MACD, ATR, VWAP)
//! - Deterministic simulation engine with one shared cash ledger
//! - Performance analytics (returns, drawdown, win rate, Sharpe)
//! - Market data providers (chart API, synthetic) and timestamp alignment
//!
//! Orchestration (fetch fan-out, worker hand-off, request/response shaping)
//! lives in `basketlab-runner`.

pub mod analytics;
pub mod codec;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
