//! Basketlab CLI — run basket backtests and inspect the symbol catalog.
//!
//! Commands:
//! - `run` — execute a backtest from flags or a TOML config file
//! - `catalog` — list known symbol selectors and their universes

use anyhow::{bail, Result};
use basketlab_core::data::{ChartApiProvider, MarketDataProvider, SyntheticProvider};
use basketlab_core::engine::StrategyParams;
use basketlab_runner::{report, run_backtest, BacktestRecord, BacktestRequest};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "basketlab", about = "Basketlab CLI — multi-symbol basket backtesting")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a backtest over a symbol selector or an explicit symbol list.
    Run {
        /// Catalog selector (see `basketlab catalog`).
        #[arg(long, conflicts_with = "symbols")]
        selector: Option<String>,

        /// Explicit symbols (e.g., SPY QQQ GLD). Bypasses the catalog.
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Path to a TOML request config. Overrides the flags above.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Start date (YYYY-MM-DD). Defaults to 2 years ago.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Starting capital for the shared pool.
        #[arg(long, default_value_t = 100_000.0)]
        initial_capital: f64,

        /// Fraction of cash risked per entry.
        #[arg(long, default_value_t = 0.02)]
        risk_per_trade: f64,

        /// Stop-loss distance below the entry price.
        #[arg(long, default_value_t = 0.05)]
        stop_loss: f64,

        /// Take-profit distance above the entry price.
        #[arg(long, default_value_t = 0.10)]
        take_profit: f64,

        /// Use the seeded synthetic data provider (no network).
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Seed for the synthetic provider.
        #[arg(long, default_value_t = 7)]
        seed: u64,

        /// Output directory for run artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// List known symbol selectors and their universes.
    Catalog,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            selector,
            symbols,
            config,
            start,
            end,
            initial_capital,
            risk_per_trade,
            stop_loss,
            take_profit,
            synthetic,
            seed,
            output_dir,
        } => {
            let request = build_request(
                selector,
                symbols,
                config,
                start,
                end,
                initial_capital,
                risk_per_trade,
                stop_loss,
                take_profit,
            )?;
            run_cmd(request, synthetic, seed, output_dir)
        }
        Commands::Catalog => {
            for selector in basketlab_runner::catalog::selectors() {
                let symbols = basketlab_runner::catalog::resolve(selector)
                    .expect("listed selector must resolve");
                println!("{selector:<14} {}", symbols.join(" "));
            }
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_request(
    selector: Option<String>,
    symbols: Vec<String>,
    config: Option<PathBuf>,
    start: Option<String>,
    end: Option<String>,
    initial_capital: f64,
    risk_per_trade: f64,
    stop_loss: f64,
    take_profit: f64,
) -> Result<BacktestRequest> {
    if let Some(path) = config {
        return BacktestRequest::from_file(&path);
    }

    if selector.is_none() && symbols.is_empty() {
        bail!("one of --selector, --symbols, or --config is required");
    }

    let start_date = parse_date(start.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive() - chrono::Duration::days(365 * 2));
    let end_date = parse_date(end.as_deref())?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    Ok(BacktestRequest {
        symbol_selector: selector,
        symbols,
        strategy: StrategyParams {
            risk_per_trade,
            stop_loss_pct: stop_loss,
            take_profit_pct: take_profit,
            ..Default::default()
        },
        start_date,
        end_date,
        initial_capital,
    })
}

fn parse_date(value: Option<&str>) -> Result<Option<NaiveDate>> {
    Ok(value
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()?)
}

fn run_cmd(request: BacktestRequest, synthetic: bool, seed: u64, output_dir: PathBuf) -> Result<()> {
    let chart_provider;
    let synthetic_provider;
    let provider: &dyn MarketDataProvider = if synthetic {
        synthetic_provider = SyntheticProvider::new(seed);
        &synthetic_provider
    } else {
        chart_provider = ChartApiProvider::default();
        &chart_provider
    };

    let run_id = request.run_id();
    let response = match run_backtest(&request, provider) {
        Ok(response) => response,
        Err(e) if e.is_client_fault() => bail!("rejected: {e}"),
        Err(e) => bail!("run failed: {e}"),
    };

    for record in &response.results {
        print_summary(record);
        let run_dir = report::save_artifacts(record, &output_dir, &run_id)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn print_summary(record: &BacktestRecord) {
    println!();
    println!("=== Backtest Result ===");
    println!("Universe:       {} ({} symbols)", record.symbol, record.symbols.len());
    if !record.dropped_symbols.is_empty() {
        println!("Dropped:        {}", record.dropped_symbols.join(" "));
    }
    println!(
        "Period:         {} to {}",
        record.start_date, record.end_date
    );
    println!("Bars:           {}", record.equity_curve.len());
    println!();
    println!("--- Performance ---");
    println!("Initial:        {:.2}", record.initial_capital);
    println!("Final:          {:.2}", record.final_capital);
    println!("Total Return:   {:.2}%", record.performance.total_return_pct);
    println!("Max Drawdown:   {:.2}%", record.performance.max_drawdown_pct);
    println!("Win Rate:       {:.1}%", record.performance.win_rate_pct);
    println!("Sharpe:         {:.3}", record.performance.sharpe);
    println!("Trades:         {}", record.performance.trades_count);
    println!();
}
