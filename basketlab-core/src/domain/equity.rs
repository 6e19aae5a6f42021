use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One point on the equity curve: cash plus the mark-to-market value of all
/// open positions at the end of a simulation step. Appended exactly once per
/// step, in step order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl EquityPoint {
    /// UTC calendar day of the point (daily-return grouping key).
    pub fn date(&self) -> NaiveDate {
        chrono::DateTime::from_timestamp_millis(self.timestamp_ms)
            .unwrap_or_default()
            .date_naive()
    }
}
