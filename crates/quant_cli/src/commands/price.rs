//! Price command implementation
//!
//! Black-Scholes call and put premiums for one set of inputs.

use quant_analytics::api;
use quant_models::analytical::OptionPrices;
use serde::Serialize;
use tracing::info;

use super::OptionArgs;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// Premiums together with the inputs that produced them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    /// Call premium.
    pub call: f64,
    /// Put premium.
    pub put: f64,
    /// `C - P - (S·e^{-qT} - K·e^{-rT})`; zero up to rounding.
    pub parity_gap: f64,
}

impl PriceReport {
    fn new(args: &OptionArgs, prices: OptionPrices) -> Self {
        let t = args.expiry.max(0.0);
        let forward = args.spot * (-args.dividend * t).exp() - args.strike * (-args.rate * t).exp();
        Self {
            call: prices.call,
            put: prices.put,
            parity_gap: prices.call - prices.put - forward,
        }
    }
}

impl Tabular for PriceReport {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Call".into(), num(self.call)),
            ("Put".into(), num(self.put)),
            ("Parity gap".into(), format!("{:.2e}", self.parity_gap)),
        ]
    }
}

/// Computes the report.
pub fn evaluate(args: &OptionArgs) -> Result<PriceReport> {
    let prices = api::black_scholes_price(&args.parameters())?;
    Ok(PriceReport::new(args, prices))
}

/// Run the price command
pub fn run(args: &OptionArgs, format: OutputFormat) -> Result<()> {
    info!(
        spot = args.spot,
        strike = args.strike,
        expiry = args.expiry,
        "Pricing European option"
    );
    output::emit(format, &evaluate(args)?)
}
