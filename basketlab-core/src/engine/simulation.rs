//! The step loop: sell pass, buy pass, mark-to-market.

use super::precompute::IndicatorSet;
use super::StrategyParams;
use crate::domain::{EquityPoint, ExitReason, Position, SeriesBatch, Trade, TradeSide};
use serde::{Deserialize, Serialize};

/// Everything a finished run produces. Trades and equity points are in
/// append order and immutable from here on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Run the simulation over an aligned batch.
///
/// The caller guarantees params have been validated; the batch type
/// guarantees alignment. The engine owns every piece of mutable state for
/// the duration of the run.
pub fn run(batch: &SeriesBatch, params: &StrategyParams, initial_capital: f64) -> SimulationOutcome {
    let indicators: Vec<IndicatorSet> = batch
        .series()
        .iter()
        .map(IndicatorSet::compute)
        .collect();

    let mut sim = Simulation {
        batch,
        indicators,
        params,
        cash: initial_capital,
        positions: vec![None; batch.symbol_count()],
        trades: Vec::new(),
        equity_curve: Vec::with_capacity(batch.bar_count()),
    };

    for i in 0..batch.bar_count() {
        sim.sell_pass(i);
        sim.buy_pass(i);
        sim.mark_to_market(i);
    }
    sim.close_all();

    tracing::debug!(
        trades = sim.trades.len(),
        final_capital = sim.cash,
        "simulation complete"
    );

    SimulationOutcome {
        initial_capital,
        final_capital: sim.cash,
        trades: sim.trades,
        equity_curve: sim.equity_curve,
    }
}

struct Simulation<'a> {
    batch: &'a SeriesBatch,
    indicators: Vec<IndicatorSet>,
    params: &'a StrategyParams,
    cash: f64,
    /// Slot per symbol, indexed by batch order. `None` = flat.
    positions: Vec<Option<Position>>,
    trades: Vec<Trade>,
    equity_curve: Vec<EquityPoint>,
}

impl Simulation<'_> {
    fn close(&self, symbol_index: usize, i: usize) -> f64 {
        self.batch.series()[symbol_index].candles[i].close
    }

    /// Check open positions in ascending symbol order. The first rule that
    /// fires fixes the recorded exit reason; the priority order is part of
    /// the contract, not an implementation detail.
    fn sell_pass(&mut self, i: usize) {
        for s in 0..self.positions.len() {
            let Some(position) = self.positions[s].clone() else {
                continue;
            };
            let price = self.close(s, i);
            if let Some(reason) = self.exit_signal(&position, s, i, price) {
                self.execute_sell(s, i, price, reason);
            }
        }
    }

    fn exit_signal(
        &self,
        position: &Position,
        s: usize,
        i: usize,
        price: f64,
    ) -> Option<ExitReason> {
        let ind = &self.indicators[s];

        if price <= position.entry_price * (1.0 - self.params.stop_loss_pct) {
            Some(ExitReason::StopLoss)
        } else if price >= position.entry_price * (1.0 + self.params.take_profit_pct) {
            Some(ExitReason::TakeProfit)
        } else if ind.rsi[i] > self.params.rsi_overbought
            && ind.macd.macd_line[i] < ind.macd.signal_line[i]
        {
            Some(ExitReason::TechnicalSell)
        } else if price < ind.vwap[i] {
            Some(ExitReason::BelowVwap)
        } else {
            None
        }
    }

    /// At most one entry per step: every flat symbol is screened, the
    /// strictly-highest ATR/price score wins, ties keep the earliest symbol.
    fn buy_pass(&mut self, i: usize) {
        if self.cash <= 0.0 {
            return;
        }

        let mut winner: Option<(usize, f64)> = None;
        for s in 0..self.positions.len() {
            if self.positions[s].is_some() {
                continue;
            }
            let price = self.close(s, i);
            if !self.entry_signal(s, i, price) {
                continue;
            }
            let score = self.indicators[s].atr[i] / price * self.params.risk_multiplier;
            if winner.map_or(true, |(_, best)| score > best) {
                winner = Some((s, score));
            }
        }

        if let Some((s, _)) = winner {
            self.execute_buy(s, i);
        }
    }

    fn entry_signal(&self, s: usize, i: usize, price: f64) -> bool {
        let ind = &self.indicators[s];
        ind.rsi[i] < self.params.rsi_oversold
            && ind.macd.macd_line[i] > ind.macd.signal_line[i]
            && price > ind.vwap[i]
    }

    fn execute_buy(&mut self, s: usize, i: usize) {
        let price = self.close(s, i);
        let risk_amount = self.cash * self.params.risk_per_trade;
        let stop_price = price * (1.0 - self.params.stop_loss_pct);
        let stop_distance = price - stop_price;
        if stop_distance <= 0.0 {
            return;
        }

        let shares = (risk_amount / stop_distance).floor();
        if shares <= 0.0 {
            return;
        }

        // Ledger invariant: a buy never drives cash negative. Tight stops
        // can size past available cash; such entries are rejected, not
        // clamped.
        let cost = shares * price;
        if cost > self.cash {
            tracing::debug!(
                symbol = %self.batch.series()[s].symbol,
                cost,
                cash = self.cash,
                "entry rejected: cost exceeds available cash"
            );
            return;
        }

        let timestamp_ms = self.batch.timestamp_ms(i);
        self.cash -= cost;
        self.positions[s] = Some(Position {
            symbol_index: s,
            shares,
            entry_price: price,
            entry_timestamp_ms: timestamp_ms,
        });
        self.trades.push(Trade {
            timestamp_ms,
            side: TradeSide::Buy,
            symbol: self.batch.series()[s].symbol.clone(),
            price,
            shares,
            profit: None,
            reason: None,
        });
    }

    fn execute_sell(&mut self, s: usize, i: usize, price: f64, reason: ExitReason) {
        let Some(position) = self.positions[s].take() else {
            return;
        };
        let profit = (price - position.entry_price) * position.shares;
        self.cash += position.shares * price;
        self.trades.push(Trade {
            timestamp_ms: self.batch.timestamp_ms(i),
            side: TradeSide::Sell,
            symbol: self.batch.series()[s].symbol.clone(),
            price,
            shares: position.shares,
            profit: Some(profit),
            reason: Some(reason),
        });
    }

    /// Equity = cash + mark-to-market value of every open position, appended
    /// exactly once per step.
    fn mark_to_market(&mut self, i: usize) {
        let positions_value: f64 = self
            .positions
            .iter()
            .enumerate()
            .filter_map(|(s, slot)| {
                slot.as_ref().map(|p| p.market_value(self.close(s, i)))
            })
            .sum();

        self.equity_curve.push(EquityPoint {
            timestamp_ms: self.batch.timestamp_ms(i),
            value: self.cash + positions_value,
        });
    }

    /// Force-close every remaining position at its last available price.
    fn close_all(&mut self) {
        let last = self.batch.bar_count() - 1;
        for s in 0..self.positions.len() {
            if self.positions[s].is_some() {
                let price = self.close(s, last);
                self.execute_sell(s, last, price, ExitReason::EndOfPeriod);
            }
        }
    }
}
