//! Run artifacts: trades.csv, equity.csv, result.json under
//! `<output>/<run_id>/`.

use crate::request::BacktestRecord;
use anyhow::{Context, Result};
use basketlab_core::domain::{Trade, TradeSide};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Flat CSV row for one trade. Sell-only columns are left empty on buys so
/// every row has the same column set.
#[derive(Debug, Serialize)]
struct TradeRow<'a> {
    date: String,
    side: &'a str,
    symbol: &'a str,
    price: f64,
    shares: f64,
    profit: Option<f64>,
    reason: Option<&'a str>,
}

impl<'a> TradeRow<'a> {
    fn from_trade(trade: &'a Trade) -> Self {
        Self {
            date: chrono::DateTime::from_timestamp_millis(trade.timestamp_ms)
                .unwrap_or_default()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            side: match trade.side {
                TradeSide::Buy => "buy",
                TradeSide::Sell => "sell",
            },
            symbol: &trade.symbol,
            price: trade.price,
            shares: trade.shares,
            profit: trade.profit,
            reason: trade.reason.map(|r| r.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
struct EquityRow {
    date: String,
    value: f64,
}

/// Write the full artifact set and return the run directory.
pub fn save_artifacts(
    record: &BacktestRecord,
    output_dir: &Path,
    run_id: &str,
) -> Result<PathBuf> {
    let run_dir = output_dir.join(run_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    write_trades_csv(&run_dir.join("trades.csv"), record)?;
    write_equity_csv(&run_dir.join("equity.csv"), record)?;
    write_result_json(&run_dir.join("result.json"), record)?;

    Ok(run_dir)
}

fn write_trades_csv(path: &Path, record: &BacktestRecord) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for trade in &record.trades {
        writer.serialize(TradeRow::from_trade(trade))?;
    }
    writer.flush().context("failed to flush trades CSV")?;
    Ok(())
}

fn write_equity_csv(path: &Path, record: &BacktestRecord) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for point in &record.equity_curve {
        writer.serialize(EquityRow {
            date: chrono::DateTime::from_timestamp_millis(point.timestamp_ms)
                .unwrap_or_default()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            value: point.value,
        })?;
    }
    writer.flush().context("failed to flush equity CSV")?;
    Ok(())
}

fn write_result_json(path: &Path, record: &BacktestRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record).context("failed to serialize result")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
