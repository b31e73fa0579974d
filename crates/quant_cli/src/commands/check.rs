//! Check command implementation
//!
//! Reports the resolved configuration and runs two smoke calculations.

use std::path::Path;

use quant_analytics::api;
use quant_models::instruments::OptionParameters;
use quant_sim::mc::SimulationParameters;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::QuantConfig;
use crate::output::{self, OutputFormat, Tabular};
use crate::Result;

/// Reference call premium for S = K = 100, T = 1, r = 5%, σ = 20%.
const REFERENCE_CALL: f64 = 10.450_583_572_185_565;

/// Outcome of `quant check`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Binary version.
    pub version: String,
    /// Configuration file path.
    pub config_path: String,
    /// Whether the file exists.
    pub config_found: bool,
    /// Default path count.
    pub num_paths: usize,
    /// Default horizon.
    pub time_horizon_days: usize,
    /// Threads available to rayon.
    pub available_threads: usize,
    /// Black-Scholes reproduces its reference value.
    pub pricing_ok: bool,
    /// A zero-volatility simulation stays flat.
    pub simulation_ok: bool,
}

impl CheckReport {
    /// `true` when every smoke calculation passed.
    pub fn healthy(&self) -> bool {
        self.pricing_ok && self.simulation_ok
    }
}

fn status(ok: bool) -> String {
    let label = if ok { "ok" } else { "FAILED" };
    label.to_string()
}

impl Tabular for CheckReport {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Version".into(), self.version.clone()),
            (
                "Config".into(),
                format!(
                    "{} ({})",
                    self.config_path,
                    if self.config_found { "found" } else { "defaults" }
                ),
            ),
            ("Default paths".into(), self.num_paths.to_string()),
            ("Default horizon (days)".into(), self.time_horizon_days.to_string()),
            ("Threads".into(), self.available_threads.to_string()),
            ("Black-Scholes".into(), status(self.pricing_ok)),
            ("Simulation".into(), status(self.simulation_ok)),
        ]
    }
}

fn pricing_smoke_test() -> Result<bool> {
    let prices = api::black_scholes_price(&OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2))?;
    Ok((prices.call - REFERENCE_CALL).abs() < 1e-4)
}

fn simulation_smoke_test() -> Result<bool> {
    let params = SimulationParameters::new(100.0, 0.0, 0.0, 10, 4);
    let result = api::simulate_gbm(&params, None, Some(1))?;
    Ok(result.final_values.iter().all(|v| *v == 100.0))
}

/// Builds the report.
pub fn evaluate(config_path: &str, config: &QuantConfig) -> Result<CheckReport> {
    Ok(CheckReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        config_path: config_path.to_string(),
        config_found: Path::new(config_path).exists(),
        num_paths: config.simulation.num_paths,
        time_horizon_days: config.simulation.time_horizon_days,
        available_threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
        pricing_ok: pricing_smoke_test()?,
        simulation_ok: simulation_smoke_test()?,
    })
}

/// Run the check command
pub fn run(config_path: &str, config: &QuantConfig, format: OutputFormat) -> Result<()> {
    info!("Checking configuration and numerics...");
    let report = evaluate(config_path, config)?;
    if !report.healthy() {
        warn!("One or more smoke calculations failed");
    }
    output::emit(format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_passes_with_defaults() {
        let report = evaluate("/nonexistent/quant.toml", &QuantConfig::default()).unwrap();
        assert!(report.healthy());
        assert!(!report.config_found);
        assert!(report.available_threads >= 1);
    }
}
