//! `quant.toml` loading.
//!
//! Every key is optional; a missing file means all defaults.
//!
//! ```toml
//! [simulation]
//! num_paths = 20000
//! time_horizon_days = 126
//! seed = 42
//!
//! [statistics]
//! risk_free_rate = 0.03
//! confidence = 0.01
//! ```

use std::path::Path;

use quant_analytics::StatisticsConfig;
use quant_sim::mc::{SimulationConfig, TRADING_DAYS_PER_YEAR};
use quant_sim::parallel::{DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use serde::Deserialize;
use tracing::{debug, info};

use crate::Result;

/// Monte Carlo defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSection {
    /// Paths per run when `--paths` is not given.
    pub num_paths: usize,
    /// Horizon when `--days` is not given.
    pub time_horizon_days: usize,
    /// Fixed seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Paths per rayon work item.
    pub batch_size: usize,
    /// Minimum path count before running in parallel.
    pub parallel_threshold: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            num_paths: 10_000,
            time_horizon_days: TRADING_DAYS_PER_YEAR as usize,
            seed: None,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Statistics defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatisticsSection {
    /// Periods per year.
    pub annualization_factor: f64,
    /// Annual risk-free rate.
    pub risk_free_rate: f64,
    /// Sortino target on horizon returns.
    pub target_return: f64,
    /// VaR tail probability.
    pub confidence: f64,
}

impl Default for StatisticsSection {
    fn default() -> Self {
        let engine = StatisticsConfig::default();
        Self {
            annualization_factor: engine.annualization_factor,
            risk_free_rate: engine.risk_free_rate,
            target_return: engine.target_return,
            confidence: quant_analytics::statistics::DEFAULT_CONFIDENCE,
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuantConfig {
    /// `[simulation]` table.
    pub simulation: SimulationSection,
    /// `[statistics]` table.
    pub statistics: StatisticsSection,
}

impl QuantConfig {
    /// Loads `path`, falling back to defaults when it does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            debug!("No configuration at {}, using defaults", path);
            return Ok(Self::default());
        }
        info!("Loading configuration from {}", path);
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Simulation config with an optional seed override.
    pub fn simulation_config(&self, seed: Option<u64>) -> Result<SimulationConfig> {
        let section = &self.simulation;
        Ok(SimulationConfig::builder()
            .maybe_seed(seed.or(section.seed))
            .batch_size(section.batch_size)
            .parallel_threshold(section.parallel_threshold)
            .build()
            .map_err(quant_core::QuantError::from)?)
    }

    /// Statistics engine settings.
    pub fn statistics_config(&self) -> StatisticsConfig {
        StatisticsConfig {
            annualization_factor: self.statistics.annualization_factor,
            risk_free_rate: self.statistics.risk_free_rate,
            target_return: self.statistics.target_return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = QuantConfig::load("/nonexistent/quant.toml").unwrap();
        assert_eq!(config, QuantConfig::default());
        assert_eq!(config.simulation.time_horizon_days, 252);
        assert_eq!(config.statistics.confidence, 0.05);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = QuantConfig::parse("[simulation]\nnum_paths = 500\nseed = 7\n").unwrap();
        assert_eq!(config.simulation.num_paths, 500);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.simulation.batch_size, 64);
        assert_eq!(config.statistics, StatisticsSection::default());
    }

    #[test]
    fn test_seed_override_wins() {
        let config = QuantConfig::parse("[simulation]\nseed = 7\n").unwrap();
        assert_eq!(config.simulation_config(Some(9)).unwrap().seed(), Some(9));
        assert_eq!(config.simulation_config(None).unwrap().seed(), Some(7));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = QuantConfig::parse("[simulation]\npaths = 5\n").unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_zero_batch_size_is_rejected() {
        let config = QuantConfig::parse("[simulation]\nbatch_size = 0\n").unwrap();
        assert!(matches!(config.simulation_config(None), Err(CliError::Quant(_))));
    }
}
