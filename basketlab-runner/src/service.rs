//! Request orchestration: validate, fetch, align, pack, hand off, shape.
//!
//! The simulation has a hard barrier on all fetches completing: the fan-out
//! runs in parallel, but nothing is packed until every symbol has either
//! delivered bars or been dropped. Per-symbol failure drops that symbol
//! (logged and reported in the record); a universe with no survivors is
//! fatal. Compute failure is fatal with no partial results.

use crate::error::ServiceError;
use crate::request::{BacktestRecord, BacktestRequest, BacktestResponse};
use crate::{catalog, worker};
use basketlab_core::analytics::{daily_returns, PerformanceMetrics};
use basketlab_core::codec::encode;
use basketlab_core::data::{align, DataError, MarketDataProvider};
use basketlab_core::domain::SymbolSeries;
use rayon::prelude::*;

/// Run one backtest end to end. Blocks until the response is ready; a run
/// is atomic from request to response.
pub fn run_backtest(
    request: &BacktestRequest,
    provider: &dyn MarketDataProvider,
) -> Result<BacktestResponse, ServiceError> {
    validate(request)?;
    let universe = resolve_universe(request)?;

    let (fetched, dropped) = fetch_universe(&universe, request, provider)?;

    let batch = align::intersect(fetched).map_err(|e| {
        tracing::error!(error = %e, "alignment failed after fetch");
        ServiceError::FetchFailed(e.to_string())
    })?;
    let symbols = batch.symbols();
    tracing::info!(
        symbols = symbols.len(),
        dropped = dropped.len(),
        bars = batch.bar_count(),
        "batch aligned and packed"
    );

    let job = worker::ComputeJob {
        batch: encode(batch.series()),
        params: request.strategy,
        initial_capital: request.initial_capital,
    };
    let outcome = worker::execute(job).map_err(|e| {
        tracing::error!(error = %e, "compute worker failed");
        ServiceError::ComputeFailed
    })?;

    let performance = PerformanceMetrics::compute(
        outcome.initial_capital,
        outcome.final_capital,
        &outcome.equity_curve,
        &outcome.trades,
    );
    let daily = daily_returns(&outcome.equity_curve);

    let record = BacktestRecord {
        symbol: universe_label(request),
        symbols,
        dropped_symbols: dropped,
        start_date: request.start_date,
        end_date: request.end_date,
        initial_capital: outcome.initial_capital,
        final_capital: outcome.final_capital,
        trades: outcome.trades,
        equity_curve: outcome.equity_curve,
        daily_returns: daily,
        performance,
    };

    // Aggregate record, normalized into a one-element collection.
    Ok(BacktestResponse {
        results: vec![record],
    })
}

/// Reject malformed requests before any fetch or compute work starts.
fn validate(request: &BacktestRequest) -> Result<(), ServiceError> {
    if !(request.initial_capital.is_finite() && request.initial_capital > 0.0) {
        return Err(ServiceError::InvalidRequest(format!(
            "initial_capital must be positive, got {}",
            request.initial_capital
        )));
    }
    if request.end_date < request.start_date {
        return Err(ServiceError::InvalidRequest(format!(
            "end_date {} precedes start_date {}",
            request.end_date, request.start_date
        )));
    }
    request
        .strategy
        .validate()
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;
    Ok(())
}

/// Explicit symbols win; otherwise the selector is resolved against the
/// catalog. A request naming neither is a client fault.
fn resolve_universe(request: &BacktestRequest) -> Result<Vec<String>, ServiceError> {
    if !request.symbols.is_empty() {
        return Ok(request.symbols.clone());
    }
    match &request.symbol_selector {
        Some(selector) => catalog::resolve(selector)
            .map(|symbols| symbols.iter().map(|s| s.to_string()).collect())
            .ok_or_else(|| ServiceError::UnknownSelector(selector.clone())),
        None => Err(ServiceError::InvalidRequest(
            "request names neither a symbol_selector nor symbols".into(),
        )),
    }
}

/// Parallel per-symbol fetch with the drop-failed policy. Succeeded series
/// keep universe order; failures are logged and returned as the dropped
/// list. All symbols failing is fatal.
fn fetch_universe(
    universe: &[String],
    request: &BacktestRequest,
    provider: &dyn MarketDataProvider,
) -> Result<(Vec<SymbolSeries>, Vec<String>), ServiceError> {
    let results: Vec<(String, Result<SymbolSeries, DataError>)> = universe
        .par_iter()
        .map(|symbol| {
            let result = provider.fetch(symbol, request.start_date, request.end_date);
            (symbol.clone(), result)
        })
        .collect();

    let mut fetched = Vec::with_capacity(results.len());
    let mut dropped = Vec::new();
    let mut last_error = None;

    for (symbol, result) in results {
        match result {
            Ok(series) if !series.is_empty() => fetched.push(series),
            Ok(_) => {
                tracing::warn!(symbol, "dropping symbol: empty series");
                dropped.push(symbol);
            }
            Err(e) => {
                tracing::warn!(symbol, error = %e, "dropping symbol: fetch failed");
                last_error = Some(e.to_string());
                dropped.push(symbol);
            }
        }
    }

    if fetched.is_empty() {
        return Err(ServiceError::FetchFailed(
            last_error.unwrap_or_else(|| "no symbols returned any bars".into()),
        ));
    }

    Ok((fetched, dropped))
}

fn universe_label(request: &BacktestRequest) -> String {
    if !request.symbols.is_empty() {
        request.symbols.join(",")
    } else {
        request
            .symbol_selector
            .clone()
            .unwrap_or_else(|| "custom".into())
    }
}
