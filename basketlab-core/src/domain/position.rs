use serde::{Deserialize, Serialize};

/// An open long position. At most one exists per symbol at any time;
/// created by a buy, destroyed by the matching sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol_index: usize,
    pub shares: f64,
    pub entry_price: f64,
    pub entry_timestamp_ms: i64,
}

impl Position {
    pub fn market_value(&self, current_price: f64) -> f64 {
        self.shares * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.shares * (current_price - self.entry_price)
    }
}
