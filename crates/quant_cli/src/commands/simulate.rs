//! Simulate command implementation
//!
//! Runs single-asset GBM paths and reports the terminal distribution and
//! its risk measures.

use clap::Args;
use quant_analytics::{Ensemble, RiskMetrics, SimulationStatistics, StatisticsEngine};
use quant_sim::mc::{JumpConfig, PathSimulator, SimulationParameters};
use serde::Serialize;
use tracing::info;

use crate::config::QuantConfig;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::Result;

/// Arguments of `quant simulate`.
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Starting price
    #[arg(long)]
    pub price: f64,

    /// Annualised drift
    #[arg(long, default_value_t = 0.08)]
    pub expected_return: f64,

    /// Annualised volatility
    #[arg(long, default_value_t = 0.2)]
    pub volatility: f64,

    /// Horizon in trading days (default from config)
    #[arg(long)]
    pub days: Option<usize>,

    /// Number of paths (default from config)
    #[arg(long)]
    pub paths: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-day jump probability; enables the jump overlay
    #[arg(long)]
    pub jump_intensity: Option<f64>,

    /// Mean log jump size
    #[arg(long, default_value_t = 0.0, requires = "jump_intensity")]
    pub jump_mean: f64,

    /// Standard deviation of the log jump size
    #[arg(long, default_value_t = 0.0, requires = "jump_intensity")]
    pub jump_std: f64,
}

/// Statistics and risk figures for one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    /// Inputs as resolved against the config.
    pub parameters: SimulationParameters,
    /// Terminal distribution summary.
    pub statistics: SimulationStatistics,
    /// Tail probability used for VaR and CVaR.
    pub confidence: f64,
    /// Risk measures.
    pub risk: RiskMetrics,
}

/// Rows shared with the portfolio report.
pub(crate) fn summary_rows(stats: &SimulationStatistics, confidence: f64, risk: &RiskMetrics) -> Vec<(String, String)> {
    let level = (1.0 - confidence) * 100.0;
    vec![
        ("Average ending value".into(), num(stats.average_ending_value)),
        ("Probability of gain".into(), num(stats.probability_of_gain)),
        ("5th percentile".into(), num(stats.percentile5)),
        ("95th percentile".into(), num(stats.percentile95)),
        ("Min".into(), num(stats.min_value)),
        ("Max".into(), num(stats.max_value)),
        ("Annualised return".into(), num(stats.annualized_expected_return)),
        ("Annualised volatility".into(), num(stats.annualized_volatility)),
        ("Sharpe".into(), num(stats.sharpe_ratio)),
        (format!("VaR {:.1}%", level), num(risk.var)),
        (format!("CVaR {:.1}%", level), num(risk.cvar)),
        ("Sortino".into(), num(risk.sortino)),
        ("Max drawdown".into(), num(risk.max_drawdown)),
    ]
}

impl Tabular for SimulationReport {
    fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("Paths".into(), self.parameters.num_paths.to_string()),
            ("Horizon (days)".into(), self.parameters.time_horizon_days.to_string()),
        ];
        rows.extend(summary_rows(&self.statistics, self.confidence, &self.risk));
        rows
    }
}

/// Runs the simulation and computes the report.
pub fn evaluate(args: &SimulateArgs, config: &QuantConfig) -> Result<SimulationReport> {
    let params = SimulationParameters::new(
        args.price,
        args.expected_return,
        args.volatility,
        args.days.unwrap_or(config.simulation.time_horizon_days),
        args.paths.unwrap_or(config.simulation.num_paths),
    );
    let jump = args
        .jump_intensity
        .map(|intensity| JumpConfig::new(intensity, args.jump_mean, args.jump_std));

    let simulator = PathSimulator::new(params, jump, config.simulation_config(args.seed)?)?;
    let ensemble = Ensemble::from_gbm(&params, simulator.simulate());

    let engine = StatisticsEngine::new(config.statistics_config())?;
    let confidence = config.statistics.confidence;
    Ok(SimulationReport {
        parameters: params,
        statistics: engine.summarize(&ensemble)?,
        confidence,
        risk: engine.risk_metrics(&ensemble, confidence)?,
    })
}

/// Run the simulate command
pub fn run(args: &SimulateArgs, config: &QuantConfig, format: OutputFormat) -> Result<()> {
    info!(price = args.price, volatility = args.volatility, "Starting simulation");
    let report = evaluate(args, config)?;
    info!("Simulation complete");
    output::emit(format, &report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(price: f64, volatility: f64) -> SimulateArgs {
        SimulateArgs {
            price,
            expected_return: 0.0,
            volatility,
            days: Some(10),
            paths: Some(1),
            seed: Some(1),
            jump_intensity: None,
            jump_mean: 0.0,
            jump_std: 0.0,
        }
    }

    #[test]
    fn test_flat_run() {
        let report = evaluate(&args(100.0, 0.0), &QuantConfig::default()).unwrap();
        assert_eq!(report.statistics.average_ending_value, 100.0);
        assert_eq!(report.risk.var, 0.0);
        assert_eq!(report.parameters.time_horizon_days, 10);
    }

    #[test]
    fn test_config_supplies_defaults() {
        let config = QuantConfig::parse("[simulation]\nnum_paths = 40\ntime_horizon_days = 5\nseed = 3\n").unwrap();
        let mut a = args(50.0, 0.3);
        a.days = None;
        a.paths = None;
        a.seed = None;
        let first = evaluate(&a, &config).unwrap();
        let second = evaluate(&a, &config).unwrap();
        assert_eq!(first.parameters.num_paths, 40);
        assert_eq!(first.statistics, second.statistics);
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        assert!(evaluate(&args(0.0, 0.2), &QuantConfig::default()).is_err());
    }

    #[test]
    fn test_table_has_risk_rows() {
        let report = evaluate(&args(100.0, 0.0), &QuantConfig::default()).unwrap();
        let rows = report.rows();
        assert!(rows.iter().any(|(k, _)| k == "VaR 95.0%"));
        assert_eq!(rows[0], ("Paths".to_string(), "1".to_string()));
    }
}
