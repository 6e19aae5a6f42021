//! Request/response contract and TOML run configuration.

use basketlab_core::analytics::{DailyReturn, PerformanceMetrics};
use basketlab_core::domain::{EquityPoint, Trade};
use basketlab_core::engine::StrategyParams;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A backtest request: which symbols, over which dates, with which strategy
/// parameters and starting capital.
///
/// The universe comes either from `symbol_selector` (resolved against the
/// catalog) or from an explicit `symbols` list, which takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub strategy: StrategyParams,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
}

impl BacktestRequest {
    /// Load a request from a TOML config file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Content-addressable identifier for this request. Two identical
    /// requests share a run id, which names the artifact directory.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("request serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// One result record. The shared-pool simulation produces a single
/// aggregate record; `symbol` carries the selector label (or the joined
/// explicit universe) and `symbols` lists what was actually simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRecord {
    pub symbol: String,
    pub symbols: Vec<String>,
    /// Symbols requested but dropped at the fetch boundary, with no bars in
    /// the packed batch.
    #[serde(default)]
    pub dropped_symbols: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    pub final_capital: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub daily_returns: Vec<DailyReturn>,
    pub performance: PerformanceMetrics,
}

/// The response: always a collection, even for a single record, so callers
/// see one shape regardless of universe size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResponse {
    pub results: Vec<BacktestRecord>,
}
