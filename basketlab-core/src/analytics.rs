//! Performance analytics — pure functions over the trade log and equity curve.
//!
//! Every metric is equity-curve/trade-slice in, scalar out. Nothing here
//! mutates simulation state; metrics are computed once at the end of a run.

use crate::domain::{EquityPoint, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trading days per year, used to annualize the Sharpe ratio.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Aggregate performance for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// (final - initial) / initial, in percent.
    pub total_return_pct: f64,
    /// Worst peak-to-trough decline over the whole curve, in percent.
    pub max_drawdown_pct: f64,
    /// Winning sells / all sells, in percent. 0 when no sells.
    pub win_rate_pct: f64,
    /// All trade records, buys and sells.
    pub trades_count: usize,
    /// Annualized mean/stdev of daily returns x sqrt(252). 0 when fewer
    /// than two daily returns or zero variance.
    pub sharpe: f64,
}

/// One day's percent change between consecutive day-closes of the equity
/// curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    pub date: NaiveDate,
    pub pct: f64,
}

impl PerformanceMetrics {
    pub fn compute(
        initial_capital: f64,
        final_capital: f64,
        equity_curve: &[EquityPoint],
        trades: &[Trade],
    ) -> Self {
        let daily = daily_returns(equity_curve);
        Self {
            total_return_pct: total_return_pct(initial_capital, final_capital),
            max_drawdown_pct: max_drawdown_pct(initial_capital, equity_curve),
            win_rate_pct: win_rate_pct(trades),
            trades_count: trades.len(),
            sharpe: sharpe_ratio(&daily),
        }
    }
}

/// Total return in percent of initial capital.
pub fn total_return_pct(initial_capital: f64, final_capital: f64) -> f64 {
    if initial_capital <= 0.0 {
        return 0.0;
    }
    (final_capital - initial_capital) / initial_capital * 100.0
}

/// Maximum drawdown in percent. The running peak is seeded with the initial
/// capital and never resets, so the metric is monotonically non-decreasing
/// as the curve is replayed prefix by prefix.
pub fn max_drawdown_pct(initial_capital: f64, equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = initial_capital;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.value > peak {
            peak = point.value;
        }
        if peak > 0.0 {
            let dd = (peak - point.value) / peak * 100.0;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

/// Percentage of sell trades that closed at a profit.
pub fn win_rate_pct(trades: &[Trade]) -> f64 {
    let sells = trades.iter().filter(|t| t.is_sell()).count();
    if sells == 0 {
        return 0.0;
    }
    let wins = trades.iter().filter(|t| t.is_winner()).count();
    wins as f64 / sells as f64 * 100.0
}

/// Group equity points by UTC calendar day, keep each day's last value as
/// that day's close, and return the percent change between consecutive
/// day-closes.
pub fn daily_returns(equity_curve: &[EquityPoint]) -> Vec<DailyReturn> {
    let mut day_closes: Vec<(NaiveDate, f64)> = Vec::new();
    for point in equity_curve {
        let date = point.date();
        match day_closes.last_mut() {
            Some((last_date, value)) if *last_date == date => *value = point.value,
            _ => day_closes.push((date, point.value)),
        }
    }

    day_closes
        .windows(2)
        .filter_map(|w| {
            let (_, prev) = w[0];
            let (date, curr) = w[1];
            if prev == 0.0 {
                return None;
            }
            Some(DailyReturn {
                date,
                pct: (curr - prev) / prev * 100.0,
            })
        })
        .collect()
}

/// Annualized Sharpe ratio over daily returns, risk-free rate zero.
pub fn sharpe_ratio(daily: &[DailyReturn]) -> f64 {
    if daily.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = daily.iter().map(|d| d.pct / 100.0).collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance =
        returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev < 1e-15 {
        return 0.0;
    }
    mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}
