//! Trade — one side of a fill, append-only once recorded.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// Why a position was exited. Fixed by the first matching rule in the
/// sell pass's priority order, or by the forced end-of-period close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    TechnicalSell,
    BelowVwap,
    EndOfPeriod,
}

impl ExitReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::StopLoss => "stop-loss",
            ExitReason::TakeProfit => "take-profit",
            ExitReason::TechnicalSell => "technical-sell",
            ExitReason::BelowVwap => "below-vwap",
            ExitReason::EndOfPeriod => "end-of-period",
        }
    }
}

/// A single trade record. `profit` and `reason` are carried on sells only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp_ms: i64,
    pub side: TradeSide,
    pub symbol: String,
    pub price: f64,
    pub shares: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<ExitReason>,
}

impl Trade {
    pub fn is_sell(&self) -> bool {
        self.side == TradeSide::Sell
    }

    /// A winning sell closed above its entry price.
    pub fn is_winner(&self) -> bool {
        matches!(self.profit, Some(p) if p > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sell() -> Trade {
        Trade {
            timestamp_ms: 1_704_240_000_000,
            side: TradeSide::Sell,
            symbol: "SPY".into(),
            price: 110.0,
            shares: 50.0,
            profit: Some(500.0),
            reason: Some(ExitReason::TakeProfit),
        }
    }

    #[test]
    fn sell_with_profit_is_winner() {
        assert!(sample_sell().is_winner());
    }

    #[test]
    fn buy_is_never_winner() {
        let trade = Trade {
            side: TradeSide::Buy,
            profit: None,
            reason: None,
            ..sample_sell()
        };
        assert!(!trade.is_winner());
    }

    #[test]
    fn exit_reason_serializes_kebab_case() {
        let json = serde_json::to_string(&ExitReason::StopLoss).unwrap();
        assert_eq!(json, "\"stop-loss\"");
        assert_eq!(ExitReason::EndOfPeriod.as_str(), "end-of-period");
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_sell();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade, deser);
    }

    #[test]
    fn buy_omits_sell_only_fields() {
        let trade = Trade {
            side: TradeSide::Buy,
            profit: None,
            reason: None,
            ..sample_sell()
        };
        let json = serde_json::to_string(&trade).unwrap();
        assert!(!json.contains("profit"));
        assert!(!json.contains("reason"));
    }
}
