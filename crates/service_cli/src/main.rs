//! Chooser CLI - Command Line Operations for Chooser Option Pricing
//!
//! Operational entry point for the chooser pricing and validation library.
//!
//! # Commands
//!
//! - `chooser price --spot <S> --strike <K> --volatility <σ> --t1 <t1> --t2 <t2>`
//!   - Price one chooser by Monte Carlo and the Rubinstein closed form
//! - `chooser backtest --input <observations.csv>` - Realized-outcome backtest
//!   with error metrics by volatility regime
//! - `chooser check` - Validate the configuration and run a pricing self-test
//!
//! # Configuration
//!
//! Defaults are read from `chooser.toml` (see `--config`) and may be
//! overridden with `CHOOSER_*` environment variables. `RUST_LOG` takes
//! precedence over the configured log level.

use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::backtest::BacktestArgs;
use commands::price::PriceArgs;
use config::CliConfig;

/// Chooser option pricing and validation CLI
#[derive(Parser)]
#[command(name = "chooser")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "chooser.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single chooser option
    Price(PriceArgs),

    /// Backtest model prices against realized payoffs
    Backtest(BacktestArgs),

    /// Check configuration and run a pricing self-test
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load_with_env_and_validate(Path::new(&cli.config))?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Price(args) => commands::price::run(&args, &config.pricing),
        Commands::Backtest(args) => commands::backtest::run(&args, &config.backtest),
        Commands::Check => commands::check::run(&config, &cli.config),
    }
}
