//! Implied volatility command implementation

use quant_analytics::api;
use quant_models::analytical::ImpliedVolatility;
use serde::Serialize;
use tracing::{info, warn};

use super::{OptionArgs, OptionKind};
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// Implied volatility and how it was reached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IvReport {
    /// Quoted premium.
    pub market_price: f64,
    /// Solver outcome.
    #[serde(flatten)]
    pub result: ImpliedVolatility,
}

impl Tabular for IvReport {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Market price".into(), num(self.market_price)),
            ("Implied volatility".into(), num(self.result.volatility)),
            ("Converged".into(), self.result.converged.to_string()),
            ("Iterations".into(), self.result.iterations.to_string()),
            ("Price error".into(), format!("{:.2e}", self.result.price_error)),
        ]
    }
}

/// Computes the report.
///
/// With `strict`, an unconverged search is an error instead of a flagged
/// estimate.
pub fn evaluate(args: &OptionArgs, kind: OptionKind, market_price: f64, strict: bool) -> Result<IvReport> {
    let result = api::implied_volatility(market_price, &args.parameters(), kind.into())?;
    if strict {
        result.require_converged()?;
    }
    if !result.converged {
        warn!(
            volatility = result.volatility,
            price_error = result.price_error,
            "Implied volatility did not converge; reporting best estimate"
        );
    }
    Ok(IvReport { market_price, result })
}

/// Run the iv command
pub fn run(
    args: &OptionArgs,
    kind: OptionKind,
    market_price: f64,
    strict: bool,
    format: OutputFormat,
) -> Result<()> {
    info!(?kind, market_price, strict, "Solving for implied volatility");
    output::emit(format, &evaluate(args, kind, market_price, strict)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args() -> OptionArgs {
        OptionArgs {
            spot: 100.0,
            strike: 100.0,
            expiry: 1.0,
            rate: 0.05,
            volatility: 0.9,
            dividend: 0.0,
        }
    }

    #[test]
    fn test_recovers_reference_volatility() {
        let report = evaluate(&args(), OptionKind::Call, 10.4506, true).unwrap();
        assert!(report.result.converged);
        assert_relative_eq!(report.result.volatility, 0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_zero_price_is_rejected() {
        assert!(evaluate(&args(), OptionKind::Put, 0.0, false).is_err());
    }

    #[test]
    fn test_strict_mode_rejects_unreachable_price() {
        // Below the forward intrinsic of ~4.88
        let lenient = evaluate(&args(), OptionKind::Call, 1.0, false).unwrap();
        assert!(!lenient.result.converged);
        let err = evaluate(&args(), OptionKind::Call, 1.0, true).unwrap_err();
        assert!(matches!(
            err,
            crate::CliError::Quant(quant_core::QuantError::NonConvergence { .. })
        ));
    }
}
