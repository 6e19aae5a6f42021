//! Simulation engine — deterministic multi-symbol trade simulation under one
//! shared cash ledger.
//!
//! Per time step the engine runs three strictly ordered passes: sells first,
//! then at most one buy, then mark-to-market. Symbol iteration order is the
//! batch order, fixed at construction, so the buy-pass tie-break is
//! reproducible run over run.

mod precompute;
mod simulation;

pub use precompute::{IndicatorSet, ATR_PERIOD, RSI_PERIOD};
pub use simulation::{run, SimulationOutcome};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strategy parameters. Fractions are plain ratios (0.05 = 5%), RSI
/// thresholds are oscillator units in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Fraction of current cash risked on a single entry.
    pub risk_per_trade: f64,
    /// Stop-loss distance below the entry price.
    pub stop_loss_pct: f64,
    /// Take-profit distance above the entry price.
    pub take_profit_pct: f64,
    /// RSI below this is an oversold (entry) reading.
    pub rsi_oversold: f64,
    /// RSI above this is an overbought (exit) reading.
    pub rsi_overbought: f64,
    /// Scales the ATR/price candidate score in the buy pass.
    pub risk_multiplier: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            risk_per_trade: 0.02,
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            risk_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("risk_per_trade must be in (0, 1], got {0}")]
    RiskPerTrade(f64),

    #[error("stop_loss_pct must be in (0, 1), got {0}")]
    StopLoss(f64),

    #[error("take_profit_pct must be positive, got {0}")]
    TakeProfit(f64),

    #[error("RSI thresholds must satisfy 0 <= oversold < overbought <= 100, got {oversold}/{overbought}")]
    RsiThresholds { oversold: f64, overbought: f64 },

    #[error("risk_multiplier must be positive, got {0}")]
    RiskMultiplier(f64),
}

impl StrategyParams {
    /// Reject parameter sets the sizing arithmetic cannot support (a zero
    /// stop distance would divide by zero in the share calculation).
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.risk_per_trade > 0.0 && self.risk_per_trade <= 1.0) {
            return Err(ParamsError::RiskPerTrade(self.risk_per_trade));
        }
        if !(self.stop_loss_pct > 0.0 && self.stop_loss_pct < 1.0) {
            return Err(ParamsError::StopLoss(self.stop_loss_pct));
        }
        if self.take_profit_pct <= 0.0 {
            return Err(ParamsError::TakeProfit(self.take_profit_pct));
        }
        if !(self.rsi_oversold >= 0.0
            && self.rsi_oversold < self.rsi_overbought
            && self.rsi_overbought <= 100.0)
        {
            return Err(ParamsError::RsiThresholds {
                oversold: self.rsi_oversold,
                overbought: self.rsi_overbought,
            });
        }
        if self.risk_multiplier <= 0.0 {
            return Err(ParamsError::RiskMultiplier(self.risk_multiplier));
        }
        Ok(())
    }
}
