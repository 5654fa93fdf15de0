//! impvol - Command Line Implied Volatility Solver
//!
//! Operational entry point for the Black-Scholes pricing and implied
//! volatility library.
//!
//! # Commands
//!
//! - `impvol solve` - Extract the implied volatility of a call quote
//! - `impvol price` - Price a European call at a given volatility
//! - `impvol check` - Print the effective solver configuration
//!
//! Settings are merged from defaults, `impvol.toml`, `IMPVOL_*` variables and
//! command-line flags, in increasing order of precedence. Logs go to stderr;
//! `RUST_LOG` overrides the configured level.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pricer_models::implied_vol::CallQuote;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::price::PriceRequest;
use commands::OutputFormat;
use config::{build_config, CliArgs, LogLevel, SolverSettings};
pub use error::{CliError, Result};

/// Black-Scholes implied volatility solver
#[derive(Parser)]
#[command(name = "impvol")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML); `impvol.toml` is used when present
    #[arg(short, long, global = true, value_name = "FILE", env = "IMPVOL_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the implied volatility of a European call quote
    Solve {
        #[command(flatten)]
        quote: QuoteArgs,

        #[command(flatten)]
        solver: SolverArgs,

        /// Fail when the iteration budget is exhausted
        #[arg(long)]
        strict: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Price a European call under Black-Scholes
    Price {
        /// Underlying price
        #[arg(long, default_value_t = 100.0)]
        spot: f64,

        /// Strike price
        #[arg(long, default_value_t = 100.0)]
        strike: f64,

        /// Continuously compounded risk-free rate
        #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
        rate: f64,

        /// Time to expiry in years
        #[arg(long, default_value_t = 1.0)]
        expiry: f64,

        /// Volatility
        #[arg(long, default_value_t = 0.2)]
        vol: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Check {
        #[command(flatten)]
        solver: SolverArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Observed quote; defaults are the reference scenario
#[derive(Args, Debug, Clone)]
struct QuoteArgs {
    /// Underlying price
    #[arg(long, default_value_t = 100.0)]
    spot: f64,

    /// Strike price
    #[arg(long, default_value_t = 100.0)]
    strike: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Time to expiry in years
    #[arg(long, default_value_t = 1.0)]
    expiry: f64,

    /// Observed option price
    #[arg(long, default_value_t = 10.0)]
    price: f64,
}

impl From<&QuoteArgs> for CallQuote {
    fn from(args: &QuoteArgs) -> Self {
        CallQuote::new(args.spot, args.strike, args.rate, args.expiry, args.price)
    }
}

/// Solver overrides; unset flags fall back to env, file, then defaults
#[derive(Args, Debug, Clone, Default)]
struct SolverArgs {
    /// Starting volatility
    #[arg(long)]
    initial_vol: Option<f64>,

    /// Absolute pricing error at which to stop
    #[arg(long)]
    tolerance: Option<f64>,

    /// Iteration budget
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Update rule (fixed-step, newton)
    #[arg(long)]
    method: Option<String>,

    /// Fixed-step multiplier
    #[arg(long)]
    learning_rate: Option<f64>,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let solver = match &self.command {
            Commands::Solve { solver, .. } | Commands::Check { solver, .. } => solver.clone(),
            Commands::Price { .. } => SolverArgs::default(),
        };

        CliArgs {
            config_file: self.config.clone(),
            tolerance: solver.tolerance,
            max_iterations: solver.max_iterations,
            initial_vol: solver.initial_vol,
            method: solver.method,
            learning_rate: solver.learning_rate,
            log_level: self.log_level.clone(),
        }
    }
}

fn init_tracing(level: LogLevel, verbose: bool) {
    let level = if verbose && level != LogLevel::Trace {
        LogLevel::Debug
    } else {
        level
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(cli: Cli, settings: &SolverSettings) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Solve {
            quote,
            strict,
            format,
            ..
        } => commands::solve::run(
            &CallQuote::from(&quote),
            settings,
            strict,
            format,
            cli.verbose,
            &mut out,
        ),
        Commands::Price {
            spot,
            strike,
            rate,
            expiry,
            vol,
            format,
        } => {
            let request = PriceRequest {
                spot,
                strike,
                rate,
                expiry,
                volatility: vol,
            };
            commands::price::run(&request, format, &mut out)
        }
        Commands::Check { format, .. } => commands::check::run(settings, format, &mut out),
    }
}

fn load_settings(args: &CliArgs) -> Result<SolverSettings> {
    if let Some(path) = &args.config_file {
        if !path.is_file() {
            return Err(CliError::InvalidArgument(format!(
                "config file not found: {}",
                path.display()
            )));
        }
    }
    Ok(build_config(args)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli.config_args()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(settings.log_level, cli.verbose);
    info!(
        tolerance = settings.tolerance,
        max_iterations = settings.max_iterations,
        initial_vol = settings.initial_vol,
        method = %settings.method,
        learning_rate = settings.learning_rate,
        "Configuration loaded"
    );

    match dispatch(cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
