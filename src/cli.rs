//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_run_config;
use crate::domain::error::RotraderError;
use crate::domain::rotation::DEFAULT_BUCKET_SIZE;
use crate::domain::run::{RotationRun, RunConfig, DEFAULT_INITIAL_VALUE};
use crate::domain::universe::Universe;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "rotrader", about = "Winner vs loser rotation backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the rotation backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Directory for the CSV report tables
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// List symbols that have price files
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the available data range for universe symbols
    Info {
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the dashboard web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config)
            } else {
                run_backtest(&config, output.as_deref())
            }
        }
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { symbol, config } => run_info(symbol.as_deref(), &config),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &std::path::Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = RotraderError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the run configuration, defaulting the end date to today.
pub fn build_run_config(adapter: &dyn ConfigPort) -> Result<RunConfig, RotraderError> {
    let start_str = adapter
        .get_string("backtest", "start_date")
        .ok_or_else(|| RotraderError::ConfigMissing {
            section: "backtest".into(),
            key: "start_date".into(),
        })?;
    let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
        RotraderError::ConfigInvalid {
            section: "backtest".into(),
            key: "start_date".into(),
            reason: "invalid date format (expected YYYY-MM-DD)".into(),
        }
    })?;

    let end_date = match adapter.get_string("backtest", "end_date") {
        Some(end_str) => NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
            RotraderError::ConfigInvalid {
                section: "backtest".into(),
                key: "end_date".into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }
        })?,
        None => chrono::Local::now().date_naive(),
    };

    Ok(RunConfig {
        start_date,
        end_date,
        initial_value: adapter.get_double("backtest", "initial_value", DEFAULT_INITIAL_VALUE),
        bucket_size: adapter.get_int("backtest", "bucket_size", DEFAULT_BUCKET_SIZE as i64)
            as usize,
    })
}

fn load_universe(adapter: &dyn ConfigPort) -> Result<Universe, RotraderError> {
    let path = adapter
        .get_string("data", "universe_file")
        .ok_or_else(|| RotraderError::ConfigMissing {
            section: "data".into(),
            key: "universe_file".into(),
        })?;
    Universe::from_csv_path(&path)
}

fn prepare(
    config_path: &std::path::Path,
) -> Result<(FileConfigAdapter, RunConfig, Universe), ExitCode> {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = load_config(config_path)?;

    if let Err(e) = validate_run_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }

    let run_config = match build_run_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    let universe = match load_universe(&adapter) {
        Ok(u) => u,
        Err(e) => {
            eprintln!("error: {e}");
            return Err((&e).into());
        }
    };

    Ok((adapter, run_config, universe))
}

fn run_backtest(config_path: &std::path::Path, output: Option<&std::path::Path>) -> ExitCode {
    let (adapter, run_config, universe) = match prepare(config_path) {
        Ok(parts) => parts,
        Err(code) => return code,
    };

    let data_port = match CsvPriceAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!(
        "Running rotation backtest: {} symbols, {} to {}",
        universe.count(),
        run_config.start_date,
        run_config.end_date,
    );

    let run = match RotationRun::execute(&data_port, &universe, &run_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_console_summary(&run);

    let output_dir = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report"));
    match CsvReportAdapter::new().write(&run, &output_dir) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn print_console_summary(run: &RotationRun) {
    let transitions = run.summary.len();
    let years = run.top.years();

    eprintln!("\n=== Rotation Results ===");
    if let (Some(first), Some(last)) = (years.first(), years.last()) {
        eprintln!("Years:            {} to {} ({} transitions)", first, last, transitions);
    }
    if let Some(last) = run.summary.last() {
        eprintln!(
            "Top bucket:       ${:.2} -> ${:.2} ({:+.2}%)",
            run.initial_value, last.top_end_value, last.top_cumulative_pct
        );
        eprintln!(
            "Bottom bucket:    ${:.2} -> ${:.2} ({:+.2}%)",
            run.initial_value, last.bottom_end_value, last.bottom_cumulative_pct
        );
    }

    eprintln!("\n=== Per-Year Summary ===");
    for row in &run.summary {
        eprintln!(
            "  {}:  top {:+.2}% (${:.2}), bottom {:+.2}% (${:.2})",
            row.year,
            row.top_return_pct,
            row.top_end_value,
            row.bottom_return_pct,
            row.bottom_end_value,
        );
    }
}

fn run_dry_run(config_path: &std::path::Path) -> ExitCode {
    let (_adapter, run_config, universe) = match prepare(config_path) {
        Ok(parts) => parts,
        Err(code) => return code,
    };

    eprintln!("Config validated successfully");
    eprintln!("\nUniverse: {} symbols", universe.count());
    for entry in &universe.entries {
        eprintln!("  {} ({})", entry.ticker, entry.name);
    }
    eprintln!("\nBacktest window:");
    eprintln!("  start:         {}", run_config.start_date);
    eprintln!("  end:           {}", run_config.end_date);
    eprintln!("  initial value: {:.2}", run_config.initial_value);
    eprintln!("  bucket size:   {}", run_config.bucket_size);

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &std::path::Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let data_port = match CsvPriceAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match data_port.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No price files found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(symbol: Option<&str>, config_path: &std::path::Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbols = match symbol {
        Some(s) => vec![s.to_uppercase()],
        None => match load_universe(&adapter) {
            Ok(u) => u.tickers(),
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        },
    };

    let data_port = match CsvPriceAdapter::from_config(&adapter) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for symbol in &symbols {
        match data_port.get_data_range(symbol) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} observations, {} to {}", symbol, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", symbol);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", symbol, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn run_serve(config_path: &std::path::Path) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let (adapter, run_config, universe) = match prepare(config_path) {
            Ok(parts) => parts,
            Err(code) => return code,
        };

        let data_port = match CsvPriceAdapter::from_config(&adapter) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        eprintln!("Computing backtest snapshot...");
        let run = match RotationRun::execute(&data_port, &universe, &run_config) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let addr: SocketAddr = adapter
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web server on {}", addr);

        let state = AppState {
            run: Arc::new(run),
            universe: Arc::new(universe),
        };
        let router = build_router(state);

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("error: failed to start runtime: {e}");
                return ExitCode::from(1);
            }
        };
        let served = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router).await
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
