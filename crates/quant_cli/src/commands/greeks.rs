//! Greeks command implementation

use quant_analytics::api;
use quant_models::analytical::Greeks;
use quant_models::instruments::OptionType;
use serde::Serialize;
use tracing::info;

use super::{OptionArgs, OptionKind};
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// Greeks for one option side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GreeksReport {
    /// Side the Greeks refer to.
    pub option_type: OptionType,
    /// Sensitivities in desk units.
    #[serde(flatten)]
    pub greeks: Greeks,
}

impl Tabular for GreeksReport {
    fn rows(&self) -> Vec<(String, String)> {
        let g = &self.greeks;
        vec![
            ("Type".into(), format!("{:?}", self.option_type)),
            ("Delta".into(), num(g.delta)),
            ("Gamma".into(), num(g.gamma)),
            ("Theta (per day)".into(), num(g.theta)),
            ("Vega (per vol point)".into(), num(g.vega)),
            ("Rho (per rate point)".into(), num(g.rho)),
        ]
    }
}

/// Computes the report.
pub fn evaluate(args: &OptionArgs, kind: OptionKind) -> Result<GreeksReport> {
    let option_type = OptionType::from(kind);
    let greeks = api::black_scholes_greeks(&args.parameters(), option_type)?;
    Ok(GreeksReport { option_type, greeks })
}

/// Run the greeks command
pub fn run(args: &OptionArgs, kind: OptionKind, format: OutputFormat) -> Result<()> {
    info!(?kind, spot = args.spot, strike = args.strike, "Computing Greeks");
    output::emit(format, &evaluate(args, kind)?)
}
