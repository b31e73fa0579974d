//! Risk command implementation
//!
//! Performance ratios of a realised return series against a benchmark:
//!
//! ```json
//! {"portfolioReturns": [0.01, -0.004, 0.007], "benchmarkReturns": [0.008, -0.002, 0.005]}
//! ```

use quant_analytics::{RatioReport, RiskManager};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::QuantConfig;
use crate::error::read_json;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// JSON input of `quant risk`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RiskRequest {
    /// Per-period portfolio returns.
    pub portfolio_returns: Vec<f64>,
    /// Per-period benchmark returns, same length.
    pub benchmark_returns: Vec<f64>,
}

/// Ratios of the portfolio series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    /// Benchmark-relative ratios.
    #[serde(flatten)]
    pub ratios: RatioReport,
    /// Annualised Sharpe ratio.
    pub sharpe: f64,
    /// Annualised Sortino ratio.
    pub sortino: f64,
    /// Maximum drawdown of the compounded equity curve.
    pub max_drawdown: f64,
}

impl Tabular for RiskReport {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Beta".into(), num(self.ratios.beta)),
            ("Alpha".into(), num(self.ratios.alpha)),
            ("Tracking error".into(), num(self.ratios.tracking_error)),
            ("Information ratio".into(), num(self.ratios.information_ratio)),
            ("Sharpe".into(), num(self.sharpe)),
            ("Sortino".into(), num(self.sortino)),
            ("Max drawdown".into(), num(self.max_drawdown)),
        ]
    }
}

/// Evaluates the request with the configured annualisation and risk-free rate.
pub fn evaluate(request: &RiskRequest, config: &QuantConfig) -> Result<RiskReport> {
    let manager = RiskManager::new(
        config.statistics.annualization_factor,
        config.statistics.risk_free_rate,
    )?;
    let returns = &request.portfolio_returns;
    let ratios = manager.ratios(returns, &request.benchmark_returns)?;

    let equity: Vec<f64> = std::iter::once(1.0)
        .chain(returns.iter().scan(1.0, |level, r| {
            *level *= 1.0 + r;
            Some(*level)
        }))
        .collect();

    Ok(RiskReport {
        ratios,
        sharpe: manager.sharpe_ratio(returns)?,
        sortino: manager.sortino_ratio(returns, config.statistics.target_return)?,
        max_drawdown: manager.max_drawdown(&equity)?,
    })
}

/// Run the risk command
pub fn run(input: &str, config: &QuantConfig, format: OutputFormat) -> Result<()> {
    info!("Loading return series from {}", input);
    let request: RiskRequest = read_json(input)?;
    info!(periods = request.portfolio_returns.len(), "Computing risk ratios");
    output::emit(format, &evaluate(&request, config)?)
}
