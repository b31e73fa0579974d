//! Portfolio command implementation
//!
//! Simulates a correlated portfolio described by a JSON file:
//!
//! ```json
//! {
//!   "assets": [
//!     {"ticker": "EQ", "weight": 0.6, "currentPrice": 100, "expectedReturn": 0.08, "volatility": 0.2},
//!     {"ticker": "BD", "weight": 0.4, "currentPrice": 50, "expectedReturn": 0.03, "volatility": 0.05}
//!   ],
//!   "correlation": [[1.0, 0.2], [0.2, 1.0]],
//!   "allocation": "inverse_volatility"
//! }
//! ```

use quant_analytics::allocation::{rebalance, AllocationMethod};
use quant_analytics::moments::mean;
use quant_analytics::{Ensemble, RiskMetrics, SimulationStatistics, StatisticsEngine};
use quant_core::math::correlation::CorrelationMatrix;
use quant_core::QuantError;
use quant_sim::mc::{CorrelatedPathSimulator, PortfolioAsset};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::simulate::summary_rows;
use crate::config::QuantConfig;
use crate::error::read_json;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// JSON input of `quant portfolio`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PortfolioRequest {
    /// Holdings.
    pub assets: Vec<PortfolioAsset>,
    /// Correlation matrix rows, in asset order.
    pub correlation: Vec<Vec<f64>>,
    /// Horizon override.
    #[serde(default)]
    pub time_horizon_days: Option<usize>,
    /// Path count override.
    #[serde(default)]
    pub num_paths: Option<usize>,
    /// Seed override.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Reweights the assets before simulating.
    #[serde(default)]
    pub allocation: Option<AllocationMethod>,
}

/// Per-asset summary line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    /// Identifier.
    pub ticker: String,
    /// Weight used in the simulation.
    pub weight: f64,
    /// Mean simulated terminal price.
    pub mean_final_price: f64,
}

/// Portfolio simulation report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    /// `Σ w·S(0)`.
    pub initial_value: f64,
    /// Holdings as simulated.
    pub assets: Vec<AssetSummary>,
    /// Terminal distribution summary.
    pub statistics: SimulationStatistics,
    /// Tail probability used for VaR and CVaR.
    pub confidence: f64,
    /// Risk measures.
    pub risk: RiskMetrics,
}

impl Tabular for PortfolioReport {
    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![("Initial value".into(), num(self.initial_value))];
        for asset in &self.assets {
            rows.push((
                format!("{} (w = {:.4})", asset.ticker, asset.weight),
                num(asset.mean_final_price),
            ));
        }
        rows.extend(summary_rows(&self.statistics, self.confidence, &self.risk));
        rows
    }
}

/// Runs the simulation described by `request`.
pub fn evaluate(request: &PortfolioRequest, config: &QuantConfig) -> Result<PortfolioReport> {
    let assets = match request.allocation {
        Some(method) => rebalance(&request.assets, method)?,
        None => request.assets.clone(),
    };
    let correlation = CorrelationMatrix::from_rows(&request.correlation).map_err(QuantError::from)?;
    let horizon = request
        .time_horizon_days
        .unwrap_or(config.simulation.time_horizon_days);
    let num_paths = request.num_paths.unwrap_or(config.simulation.num_paths);

    let simulator = CorrelatedPathSimulator::new(
        assets,
        &correlation,
        horizon,
        num_paths,
        config.simulation_config(request.seed)?,
    )?;
    let results = simulator.simulate();

    let summaries = simulator
        .assets()
        .iter()
        .enumerate()
        .map(|(i, asset)| {
            let finals: Vec<f64> = results.asset_final_prices.iter().map(|p| p[i]).collect();
            AssetSummary {
                ticker: asset.ticker.clone(),
                weight: asset.weight,
                mean_final_price: mean(&finals),
            }
        })
        .collect();

    let initial_value = results.initial_value;
    let ensemble = Ensemble::from_portfolio(horizon, results);
    let engine = StatisticsEngine::new(config.statistics_config())?;
    let confidence = config.statistics.confidence;
    Ok(PortfolioReport {
        initial_value,
        assets: summaries,
        statistics: engine.summarize(&ensemble)?,
        confidence,
        risk: engine.risk_metrics(&ensemble, confidence)?,
    })
}

/// Run the portfolio command
pub fn run(input: &str, config: &QuantConfig, format: OutputFormat) -> Result<()> {
    info!("Loading portfolio from {}", input);
    let request: PortfolioRequest = read_json(input)?;
    info!(assets = request.assets.len(), "Starting portfolio simulation");
    output::emit(format, &evaluate(&request, config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const REQUEST: &str = r#"{
        "assets": [
            {"ticker": "EQ", "weight": 0.6, "currentPrice": 100.0, "expectedReturn": 0.0, "volatility": 0.0},
            {"ticker": "BD", "weight": 0.4, "currentPrice": 50.0, "expectedReturn": 0.0, "volatility": 0.0}
        ],
        "correlation": [[1.0, 0.2], [0.2, 1.0]],
        "timeHorizonDays": 5,
        "numPaths": 3,
        "seed": 11
    }"#;

    #[test]
    fn test_flat_portfolio() {
        let request: PortfolioRequest = serde_json::from_str(REQUEST).unwrap();
        let report = evaluate(&request, &QuantConfig::default()).unwrap();
        assert_relative_eq!(report.initial_value, 80.0, epsilon = 1e-12);
        assert_relative_eq!(report.statistics.average_ending_value, 80.0, epsilon = 1e-12);
        assert_eq!(report.assets[1].mean_final_price, 50.0);
    }

    #[test]
    fn test_allocation_reweights() {
        let mut request: PortfolioRequest = serde_json::from_str(REQUEST).unwrap();
        request.allocation = Some(AllocationMethod::EqualWeight);
        let report = evaluate(&request, &QuantConfig::default()).unwrap();
        assert_eq!(report.assets[0].weight, 0.5);
        assert_relative_eq!(report.initial_value, 75.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bad_correlation_is_rejected() {
        let mut request: PortfolioRequest = serde_json::from_str(REQUEST).unwrap();
        request.correlation = vec![vec![1.0, 1.5], vec![1.5, 1.0]];
        let err = evaluate(&request, &QuantConfig::default()).unwrap_err();
        assert!(matches!(err, crate::CliError::Quant(QuantError::InvalidCorrelationMatrix(_))));
    }
}
