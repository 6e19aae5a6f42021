//! Service error taxonomy: client faults versus server faults.
//!
//! Client faults are rejected before any fetch or compute work starts and
//! carry their detail verbatim. Server faults surface a generic message to
//! the caller — the detail is logged server-side where it was raised.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unknown symbol selector '{0}'")]
    UnknownSelector(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("historical data fetch failed: {0}")]
    FetchFailed(String),

    #[error("backtest computation failed")]
    ComputeFailed,
}

impl ServiceError {
    /// Whether the caller is at fault. Drives the status mapping at the
    /// transport boundary (client fault = 4xx-class, server fault = 5xx).
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            ServiceError::UnknownSelector(_) | ServiceError::InvalidRequest(_)
        )
    }
}
