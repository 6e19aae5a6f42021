//! Service-level tests: the full request → response path against the
//! synthetic provider, and the fault taxonomy at the boundary.

use basketlab_core::data::{DataError, MarketDataProvider, SyntheticProvider};
use basketlab_core::domain::SymbolSeries;
use basketlab_core::engine::StrategyParams;
use basketlab_runner::{run_backtest, BacktestRequest, ServiceError};
use chrono::NaiveDate;

fn sample_request() -> BacktestRequest {
    BacktestRequest {
        symbol_selector: Some("metals".into()),
        symbols: vec![],
        strategy: StrategyParams::default(),
        start_date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        initial_capital: 100_000.0,
    }
}

/// Wraps the synthetic provider but fails for a configured set of symbols.
struct FlakyProvider {
    inner: SyntheticProvider,
    failing: Vec<&'static str>,
}

impl MarketDataProvider for FlakyProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<SymbolSeries, DataError> {
        if self.failing.iter().any(|f| *f == symbol) {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        self.inner.fetch(symbol, start, end)
    }
}

#[test]
fn selector_run_returns_one_aggregate_record() {
    let provider = SyntheticProvider::new(42);
    let response = run_backtest(&sample_request(), &provider).unwrap();

    assert_eq!(response.results.len(), 1);
    let record = &response.results[0];
    assert_eq!(record.symbol, "metals");
    assert_eq!(record.symbols.len(), 4);
    assert!(record.dropped_symbols.is_empty());
    assert!(!record.equity_curve.is_empty());
    assert_eq!(record.initial_capital, 100_000.0);
    assert_eq!(record.performance.trades_count, record.trades.len());
}

#[test]
fn explicit_symbols_bypass_the_catalog() {
    let provider = SyntheticProvider::new(42);
    let request = BacktestRequest {
        symbol_selector: None,
        symbols: vec!["AAA".into(), "BBB".into()],
        ..sample_request()
    };
    let response = run_backtest(&request, &provider).unwrap();

    let record = &response.results[0];
    assert_eq!(record.symbol, "AAA,BBB");
    assert_eq!(record.symbols, vec!["AAA", "BBB"]);
}

#[test]
fn run_is_reproducible() {
    let provider = SyntheticProvider::new(42);
    let request = sample_request();
    let first = run_backtest(&request, &provider).unwrap();
    let second = run_backtest(&request, &provider).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_selector_is_a_client_fault() {
    let provider = SyntheticProvider::new(42);
    let request = BacktestRequest {
        symbol_selector: Some("lunar-regolith".into()),
        ..sample_request()
    };
    let err = run_backtest(&request, &provider).unwrap_err();
    assert!(matches!(err, ServiceError::UnknownSelector(ref s) if s == "lunar-regolith"));
    assert!(err.is_client_fault());
}

#[test]
fn missing_universe_is_a_client_fault() {
    let provider = SyntheticProvider::new(42);
    let request = BacktestRequest {
        symbol_selector: None,
        symbols: vec![],
        ..sample_request()
    };
    let err = run_backtest(&request, &provider).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(_)));
    assert!(err.is_client_fault());
}

#[test]
fn non_positive_capital_is_rejected_before_fetching() {
    let provider = SyntheticProvider::new(42);
    let request = BacktestRequest {
        initial_capital: 0.0,
        ..sample_request()
    };
    let err = run_backtest(&request, &provider).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(_)));
}

#[test]
fn bad_strategy_params_are_rejected() {
    let request = BacktestRequest {
        strategy: StrategyParams {
            stop_loss_pct: 0.0,
            ..Default::default()
        },
        ..sample_request()
    };
    let err = run_backtest(&request, &SyntheticProvider::new(42)).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRequest(_)));
}

#[test]
fn failed_symbols_are_dropped_and_reported() {
    let provider = FlakyProvider {
        inner: SyntheticProvider::new(42),
        failing: vec!["GLD", "CPER"],
    };
    let response = run_backtest(&sample_request(), &provider).unwrap();

    let record = &response.results[0];
    assert_eq!(record.symbols, vec!["SLV", "PPLT"]);
    assert_eq!(record.dropped_symbols, vec!["GLD", "CPER"]);
}

#[test]
fn total_fetch_failure_is_a_server_fault() {
    let provider = FlakyProvider {
        inner: SyntheticProvider::new(42),
        failing: vec!["GLD", "SLV", "CPER", "PPLT"],
    };
    let err = run_backtest(&sample_request(), &provider).unwrap_err();
    assert!(matches!(err, ServiceError::FetchFailed(_)));
    assert!(!err.is_client_fault());
}

#[test]
fn equity_identity_holds_through_the_full_stack() {
    let provider = SyntheticProvider::new(7);
    let request = BacktestRequest {
        symbol_selector: Some("energy".into()),
        ..sample_request()
    };
    let record = &run_backtest(&request, &provider).unwrap().results[0];

    // Final capital must equal initial capital plus realized sell profits.
    let realized: f64 = record.trades.iter().filter_map(|t| t.profit).sum();
    assert!((record.final_capital - (record.initial_capital + realized)).abs() < 1e-6);

    // And the performance block must agree with the raw numbers.
    let expected_return = (record.final_capital - record.initial_capital)
        / record.initial_capital
        * 100.0;
    assert!((record.performance.total_return_pct - expected_return).abs() < 1e-9);
}
