//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_date, validate_frontier_config};
pub use crate::domain::config_validation::RunOverrides;
use crate::domain::error::FrontierError;
use crate::domain::frontier::{
    DEFAULT_RISK_FREE_RATE, DEFAULT_SEED, DEFAULT_TRIALS, FrontierParams, FrontierResult,
    generate_frontier,
};
use crate::domain::moments::estimate_moments;
use crate::domain::price_series::{align_on_common_dates, build_returns};
use crate::domain::scorer::ScoredPortfolio;
use crate::domain::universe::{AssetUniverse, parse_assets};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::FrontierReportPort;

pub const DEFAULT_OUTPUT: &str = "frontier.csv";

#[derive(Parser, Debug)]
#[command(name = "frontier", about = "Monte Carlo efficient frontier estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample the frontier and write the ranked portfolios
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Comma-separated asset list, overrides [frontier] assets
        #[arg(long)]
        assets: Option<String>,
        #[arg(long)]
        trials: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, allow_negative_numbers = true)]
        risk_free_rate: Option<f64>,
    },
    /// Validate a configuration without reading price data
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List assets available in the data directory
    ListAssets {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the data range of configured asset(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        asset: Option<String>,
    },
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub universe: AssetUniverse,
    pub params: FrontierParams,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub align_dates: bool,
    pub output: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            config,
            output,
            assets,
            trials,
            seed,
            risk_free_rate,
        } => {
            let overrides = RunOverrides {
                output,
                assets,
                trials,
                seed,
                risk_free_rate,
            };
            run_frontier(&config, &overrides)
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListAssets { config } => run_list_assets(&config),
        Command::Info { config, asset } => run_info(&config, asset.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, FrontierError> {
    info!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path)
}

pub fn build_run_config(
    adapter: &dyn ConfigPort,
    overrides: &RunOverrides,
) -> Result<RunConfig, FrontierError> {
    let data_dir = adapter
        .get_string("data", "directory")
        .ok_or_else(|| FrontierError::ConfigMissing {
            section: "data".into(),
            key: "directory".into(),
        })?;

    let assets = match &overrides.assets {
        Some(a) => a.clone(),
        None => adapter
            .get_string("frontier", "assets")
            .ok_or_else(|| FrontierError::ConfigMissing {
                section: "frontier".into(),
                key: "assets".into(),
            })?,
    };
    let universe =
        parse_assets(&assets).map_err(|e| config_invalid("assets", &e.to_string()))?;

    let trials = match overrides.trials {
        Some(t) => t,
        None => match adapter.get_int("frontier", "trials")? {
            None => DEFAULT_TRIALS,
            Some(t) => usize::try_from(t)
                .ok()
                .filter(|&t| t >= 1)
                .ok_or_else(|| config_invalid("trials", "trials must be at least 1"))?,
        },
    };
    let seed = match overrides.seed {
        Some(s) => s,
        None => match adapter.get_int("frontier", "seed")? {
            None => DEFAULT_SEED,
            Some(s) => u64::try_from(s)
                .map_err(|_| config_invalid("seed", "seed must be non-negative"))?,
        },
    };
    let risk_free_rate = match overrides.risk_free_rate {
        Some(r) => r,
        None => adapter
            .get_double("frontier", "risk_free_rate")?
            .unwrap_or(DEFAULT_RISK_FREE_RATE),
    };
    let parallel = adapter.get_bool("frontier", "parallel")?.unwrap_or(false);
    let align_dates = adapter.get_bool("frontier", "align_dates")?.unwrap_or(false);

    let output = overrides.output.clone().unwrap_or_else(|| {
        PathBuf::from(
            adapter
                .get_string("report", "output")
                .unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
        )
    });

    Ok(RunConfig {
        data_dir: PathBuf::from(data_dir),
        universe,
        params: FrontierParams {
            trials,
            seed,
            risk_free_rate,
            parallel,
        },
        start_date: parse_date(adapter, "start_date")?,
        end_date: parse_date(adapter, "end_date")?,
        align_dates,
        output,
    })
}

fn config_invalid(key: &str, reason: &str) -> FrontierError {
    FrontierError::ConfigInvalid {
        section: "frontier".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

/// Load prices, estimate moments, sample the frontier and write the report.
/// Any failure aborts the whole run.
pub fn run_frontier_pipeline(
    data_port: &dyn PriceDataPort,
    report_port: &dyn FrontierReportPort,
    run: &RunConfig,
) -> Result<FrontierResult, FrontierError> {
    let mut series = Vec::with_capacity(run.universe.len());
    for asset in run.universe.assets() {
        let prices = data_port.fetch_prices(asset, run.start_date, run.end_date)?;
        info!("  {}: {} prices", asset, prices.len());
        series.push(prices);
    }

    if run.align_dates {
        let before: Vec<usize> = series.iter().map(|s| s.len()).collect();
        series = align_on_common_dates(&series);
        for (s, n) in series.iter().zip(before) {
            if s.len() < n {
                warn!("{}: dropped {} dates not shared by all assets", s.asset(), n - s.len());
            }
        }
    }

    let returns = series
        .iter()
        .map(build_returns)
        .collect::<Result<Vec<_>, _>>()?;
    let moments = estimate_moments(&run.universe, &returns)?;

    info!(
        "Sampling {} portfolios over {} assets (seed {})",
        run.params.trials,
        run.universe.len(),
        run.params.seed
    );
    let result = generate_frontier(&moments.mean, &moments.covariance, &run.params)?;

    report_port.write(&result, &run.universe, &run.output)?;
    info!("Report written to: {}", run.output.display());

    Ok(result)
}

fn run_frontier(config_path: &Path, overrides: &RunOverrides) -> Result<(), FrontierError> {
    let adapter = load_config(config_path)?;
    validate_frontier_config(&adapter, overrides)?;
    let run = build_run_config(&adapter, overrides)?;

    let data_port = CsvPriceAdapter::new(run.data_dir.clone());
    let report_port = CsvReportAdapter::new();
    let result = run_frontier_pipeline(&data_port, &report_port, &run)?;

    print_summary(&result, &run.universe);
    Ok(())
}

fn print_summary(result: &FrontierResult, universe: &AssetUniverse) {
    eprintln!("\n=== Frontier ({} portfolios) ===", result.len());
    if let Some(p) = result.min_volatility() {
        eprintln!("Minimum volatility:");
        print_portfolio(p, universe);
    }
    if let Some(p) = result.max_sharpe() {
        eprintln!("Maximum Sharpe ratio:");
        print_portfolio(p, universe);
    }
}

fn print_portfolio(p: &ScoredPortfolio, universe: &AssetUniverse) {
    eprintln!("  Return:       {:.2}%", p.expected_return * 100.0);
    eprintln!("  Volatility:   {:.2}%", p.volatility * 100.0);
    eprintln!("  Sharpe Ratio: {:.3}", p.sharpe_ratio);
    for (asset, w) in universe.assets().iter().zip(p.weights.as_slice()) {
        eprintln!("    {:<10} {:>6.2}%", asset, w * 100.0);
    }
}

fn run_validate(config_path: &Path) -> Result<(), FrontierError> {
    let adapter = load_config(config_path)?;
    let overrides = RunOverrides::default();
    validate_frontier_config(&adapter, &overrides)?;
    let run = build_run_config(&adapter, &overrides)?;

    eprintln!("Config validated successfully\n");
    eprintln!("  data directory: {}", run.data_dir.display());
    eprintln!("  assets:         {}", run.universe.assets().join(", "));
    eprintln!("  trials:         {}", run.params.trials);
    eprintln!("  seed:           {}", run.params.seed);
    eprintln!("  risk-free rate: {}", run.params.risk_free_rate);
    if let Some(d) = run.start_date {
        eprintln!("  start date:     {}", d);
    }
    if let Some(d) = run.end_date {
        eprintln!("  end date:       {}", d);
    }
    eprintln!("  align dates:    {}", run.align_dates);
    eprintln!("  parallel:       {}", run.params.parallel);
    eprintln!("  output:         {}", run.output.display());
    Ok(())
}

fn data_directory(adapter: &dyn ConfigPort) -> Result<PathBuf, FrontierError> {
    adapter
        .get_string("data", "directory")
        .map(PathBuf::from)
        .ok_or_else(|| FrontierError::ConfigMissing {
            section: "data".into(),
            key: "directory".into(),
        })
}

fn run_list_assets(config_path: &Path) -> Result<(), FrontierError> {
    let adapter = load_config(config_path)?;
    let data_port = CsvPriceAdapter::new(data_directory(&adapter)?);

    let assets = data_port.list_assets()?;
    if assets.is_empty() {
        eprintln!("No price files found");
    } else {
        for asset in &assets {
            println!("{}", asset);
        }
        eprintln!("{} assets found", assets.len());
    }
    Ok(())
}

fn run_info(config_path: &Path, asset: Option<&str>) -> Result<(), FrontierError> {
    let adapter = load_config(config_path)?;
    let data_port = CsvPriceAdapter::new(data_directory(&adapter)?);

    let assets: Vec<String> = match asset {
        Some(a) => vec![a.to_string()],
        None => match adapter.get_string("frontier", "assets") {
            Some(list) => parse_assets(&list)
                .map_err(|e| FrontierError::ConfigInvalid {
                    section: "frontier".into(),
                    key: "assets".into(),
                    reason: e.to_string(),
                })?
                .assets()
                .to_vec(),
            None => data_port.list_assets()?,
        },
    };

    for asset in &assets {
        match data_port.get_data_range(asset)? {
            Some((first, last, count)) => {
                println!("{}: {} to {} ({} prices)", asset, first, last, count)
            }
            None => println!("{}: no data", asset),
        }
    }
    Ok(())
}
