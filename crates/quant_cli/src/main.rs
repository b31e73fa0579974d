//! Quantlab CLI - Command Line Access to the Calculation Core
//!
//! This is the operational entry point for the quantlab calculation core.
//!
//! # Commands
//!
//! - `quant simulate --price <p>` - Single-asset GBM simulation with statistics
//! - `quant portfolio --input <file>` - Correlated portfolio simulation
//! - `quant price` / `quant greeks` / `quant iv` - Black-Scholes analytics
//! - `quant payoff --input <file>` / `--preset` - Multi-leg option payoff profile
//! - `quant signal --input <file>` - Trading signal and position size
//! - `quant risk --input <file>` - Benchmark-relative performance ratios
//! - `quant check` - Configuration and smoke calculations
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate is the only place that
//! installs a tracing subscriber, reads files or prints. Logs go to stderr;
//! results go to stdout.

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::payoff::PayoffArgs;
use commands::simulate::SimulateArgs;
use commands::{OptionArgs, OptionKind};
use config::QuantConfig;
use output::OutputFormat;

/// Quantlab calculation core CLI
#[derive(Parser)]
#[command(name = "quant")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "quant.toml")]
    config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one asset with geometric Brownian motion
    Simulate(SimulateArgs),

    /// Simulate a correlated portfolio
    Portfolio {
        /// Path to the portfolio description (JSON)
        #[arg(short, long)]
        input: String,
    },

    /// Black-Scholes call and put premiums
    Price(OptionArgs),

    /// Black-Scholes Greeks
    Greeks {
        #[command(flatten)]
        option: OptionArgs,

        /// Option side
        #[arg(short = 't', long, value_enum, default_value_t = OptionKind::Call)]
        option_type: OptionKind,
    },

    /// Implied volatility from a market premium
    Iv {
        #[command(flatten)]
        option: OptionArgs,

        /// Option side
        #[arg(short = 't', long, value_enum, default_value_t = OptionKind::Call)]
        option_type: OptionKind,

        /// Observed option premium
        #[arg(short, long)]
        market_price: f64,

        /// Fail instead of reporting an unconverged estimate
        #[arg(long)]
        strict: bool,
    },

    /// Expiry payoff profile of a multi-leg strategy
    Payoff(PayoffArgs),

    /// Trading signal for a price history
    Signal {
        /// Path to the signal request (JSON)
        #[arg(short, long)]
        input: String,
    },

    /// Performance ratios against a benchmark
    Risk {
        /// Path to the return series (JSON)
        #[arg(short, long)]
        input: String,
    },

    /// Check configuration and run smoke calculations
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialise tracing; RUST_LOG takes precedence over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = QuantConfig::load(&cli.config)?;
    debug!(?config, "Resolved configuration");
    let format = cli.format;

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(&args, &config, format),
        Commands::Portfolio { input } => commands::portfolio::run(&input, &config, format),
        Commands::Price(option) => commands::price::run(&option, format),
        Commands::Greeks {
            option,
            option_type,
        } => commands::greeks::run(&option, option_type, format),
        Commands::Iv {
            option,
            option_type,
            market_price,
            strict,
        } => commands::iv::run(&option, option_type, market_price, strict, format),
        Commands::Payoff(args) => commands::payoff::run(&args, format),
        Commands::Signal { input } => commands::signal::run(&input, format),
        Commands::Risk { input } => commands::risk::run(&input, &config, format),
        Commands::Check => commands::check::run(&cli.config, &config, format),
    }
}
