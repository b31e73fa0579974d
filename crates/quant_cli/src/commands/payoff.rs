//! Payoff command implementation
//!
//! Reads a JSON array of legs and prints the expiry payoff profile:
//!
//! ```json
//! [
//!   {"type": "call", "action": "buy", "strike": 100, "quantity": 1, "premium": 5}
//! ]
//! ```
//!
//! Common shapes can be given inline instead, e.g.
//! `quant payoff --preset bull-call-spread --strikes 95,105 --premiums 7,3`.

use clap::{Args, ValueEnum};
use quant_models::instruments::{spot_grid, OptionStrategy, StrategyProfile};
use serde::Serialize;
use tracing::info;

use crate::error::read_json;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::{CliError, Result};

/// Built-in strategy shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Long call and long put at one strike (1 strike, call then put premium)
    Straddle,
    /// Long lower call, short upper call (2 strikes, 2 premiums)
    BullCallSpread,
}

impl Preset {
    /// Legs of this shape.
    pub fn build(self, strikes: &[f64], premiums: &[f64]) -> Result<OptionStrategy> {
        match (self, strikes, premiums) {
            (Preset::Straddle, &[strike], &[call, put]) => Ok(OptionStrategy::straddle(strike, call, put)),
            (Preset::BullCallSpread, &[lower, upper], &[lower_premium, upper_premium]) => {
                if lower >= upper {
                    return Err(CliError::InvalidArgument(format!(
                        "bull call spread needs lower < upper strike, got {} and {}",
                        lower, upper
                    )));
                }
                Ok(OptionStrategy::bull_call_spread(lower, upper, lower_premium, upper_premium))
            }
            (preset, _, _) => Err(CliError::InvalidArgument(format!(
                "{:?} takes {} strike(s) and 2 premiums, got {} and {}",
                preset,
                if preset == Preset::Straddle { 1 } else { 2 },
                strikes.len(),
                premiums.len()
            ))),
        }
    }
}

/// Arguments of `quant payoff`.
#[derive(Debug, Clone, Args)]
pub struct PayoffArgs {
    /// Path to the strategy legs (JSON)
    #[arg(short, long, required_unless_present = "preset", conflicts_with = "preset")]
    pub input: Option<String>,

    /// Built-in strategy instead of a legs file
    #[arg(long, value_enum, requires = "strikes", requires = "premiums")]
    pub preset: Option<Preset>,

    /// Preset strikes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub strikes: Vec<f64>,

    /// Preset premiums, comma separated
    #[arg(long, value_delimiter = ',')]
    pub premiums: Vec<f64>,

    /// Lowest spot on the grid (default: half the lowest strike)
    #[arg(long)]
    pub lower: Option<f64>,

    /// Highest spot on the grid (default: 1.5x the highest strike)
    #[arg(long)]
    pub upper: Option<f64>,

    /// Number of grid points
    #[arg(long, default_value_t = 41)]
    pub points: usize,
}

/// Payoff profile for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct PayoffReport(pub StrategyProfile);

impl Tabular for PayoffReport {
    fn rows(&self) -> Vec<(String, String)> {
        let profile = &self.0;
        let breakevens = if profile.breakevens.is_empty() {
            "none".to_string()
        } else {
            profile
                .breakevens
                .iter()
                .map(|b| format!("{:.2}", b))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut rows = vec![
            ("Max profit".into(), num(profile.max_profit)),
            ("Max loss".into(), num(profile.max_loss)),
            ("Break-evens".into(), breakevens),
        ];
        rows.extend(
            profile
                .points
                .iter()
                .map(|p| (format!("S = {:.2}", p.spot), num(p.payoff))),
        );
        rows
    }
}

/// Evaluates `strategy` over the grid described by `args`.
pub fn evaluate(strategy: &OptionStrategy, args: &PayoffArgs) -> Result<PayoffReport> {
    if strategy.legs().is_empty() {
        return Err(CliError::InvalidArgument("strategy has no legs".to_string()));
    }
    let strikes = strategy.legs().iter().map(|leg| leg.strike);
    let lowest = strikes.clone().fold(f64::INFINITY, f64::min);
    let highest = strikes.fold(f64::NEG_INFINITY, f64::max);
    let lower = args.lower.unwrap_or(0.5 * lowest);
    let upper = args.upper.unwrap_or(1.5 * highest);
    let spots = spot_grid(lower, upper, args.points)?;
    Ok(PayoffReport(strategy.profile(&spots)?))
}

/// Legs from the input file or the preset.
pub fn load_strategy(args: &PayoffArgs) -> Result<OptionStrategy> {
    match (&args.input, args.preset) {
        (Some(path), _) => {
            info!("Loading strategy from {}", path);
            read_json(path)
        }
        (None, Some(preset)) => preset.build(&args.strikes, &args.premiums),
        (None, None) => Err(CliError::InvalidArgument(
            "either --input or --preset is required".to_string(),
        )),
    }
}

/// Run the payoff command
pub fn run(args: &PayoffArgs, format: OutputFormat) -> Result<()> {
    let strategy = load_strategy(args)?;
    info!(legs = strategy.legs().len(), "Evaluating payoff profile");
    output::emit(format, &evaluate(&strategy, args)?)
}
