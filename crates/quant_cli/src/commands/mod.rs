//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod greeks;
pub mod iv;
pub mod payoff;
pub mod portfolio;
pub mod price;
pub mod risk;
pub mod signal;
pub mod simulate;

use clap::{Args, ValueEnum};
use quant_models::instruments::{OptionParameters, OptionType};

/// Option side as a command-line value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionKind {
    /// Call option.
    Call,
    /// Put option.
    Put,
}

impl From<OptionKind> for OptionType {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => OptionType::Call,
            OptionKind::Put => OptionType::Put,
        }
    }
}

/// Black-Scholes inputs shared by `price`, `greeks` and `iv`.
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Spot price
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub expiry: f64,

    /// Continuously compounded risk-free rate
    #[arg(long, default_value_t = 0.05)]
    pub rate: f64,

    /// Annualised volatility (ignored by `iv`)
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// Continuous dividend yield
    #[arg(long, default_value_t = 0.0)]
    pub dividend: f64,
}

impl OptionArgs {
    /// Builds the core parameter struct.
    pub fn parameters(&self) -> OptionParameters {
        OptionParameters::new(self.spot, self.strike, self.expiry, self.rate, self.volatility)
            .with_dividend_yield(self.dividend)
    }
}
