//! Ensemble statistics and risk metrics.
//!
//! ## Conventions
//!
//! - Percentiles are nearest-rank: the value at sorted index
//!   `floor(p·N)`, clamped to `N - 1`. No interpolation.
//! - Horizon returns are `vᵢ / initial - 1`. They are annualised by
//!   `factor / horizon_days` (mean) and `sqrt(factor / horizon_days)`
//!   (population standard deviation).
//! - Zero denominators give a Sharpe or Sortino of `0.0`.

use quant_core::types::validation::{ensure_finite, ensure_positive};
use quant_core::{QuantError, QuantResult};
use quant_sim::mc::{GbmResult, PortfolioResults, SimulationParameters};
use rayon::prelude::*;

use crate::moments::{downside_deviation, max_drawdown, mean, population_variance, ratio_or_zero};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default annualisation factor (trading days per year).
pub const DEFAULT_ANNUALIZATION_FACTOR: f64 = 252.0;

/// Default VaR tail probability.
pub const DEFAULT_CONFIDENCE: f64 = 0.05;

/// Ensemble size from which sorting runs on rayon.
const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// Terminal values of a simulation and what is needed to interpret them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Ensemble {
    /// Starting value common to every path.
    pub initial_value: f64,
    /// Trading days between start and terminal values.
    pub horizon_days: usize,
    /// Terminal value per simulation.
    pub final_values: Vec<f64>,
    /// Full paths, when retained. Drawdown falls back to `[initial, final]`
    /// per simulation when empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub paths: Vec<Vec<f64>>,
}

impl Ensemble {
    /// Terminal values without paths.
    pub fn new(initial_value: f64, horizon_days: usize, final_values: Vec<f64>) -> Self {
        Self {
            initial_value,
            horizon_days,
            final_values,
            paths: Vec::new(),
        }
    }

    /// Attaches full paths.
    pub fn with_paths(mut self, paths: Vec<Vec<f64>>) -> Self {
        self.paths = paths;
        self
    }

    /// Wraps a single-asset run.
    pub fn from_gbm(params: &SimulationParameters, result: GbmResult) -> Self {
        Self::new(params.current_price, params.time_horizon_days, result.final_values).with_paths(result.paths)
    }

    /// Wraps a portfolio run over `horizon_days`.
    pub fn from_portfolio(horizon_days: usize, results: PortfolioResults) -> Self {
        Self::new(results.initial_value, horizon_days, results.final_values).with_paths(results.paths)
    }

    /// Validates the ensemble.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` for no values, a non-positive initial
    /// value, a zero horizon, or any non-finite value.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_positive("initial_value", self.initial_value)?;
        if self.horizon_days == 0 {
            return Err(QuantError::invalid("horizon_days", "must be at least 1"));
        }
        if self.final_values.is_empty() {
            return Err(QuantError::invalid("final_values", "must not be empty"));
        }
        for &value in &self.final_values {
            ensure_finite("final_values", value)?;
        }
        for path in &self.paths {
            for &value in path {
                ensure_finite("paths", value)?;
            }
        }
        Ok(())
    }

    fn horizon_returns(&self) -> Vec<f64> {
        self.final_values
            .iter()
            .map(|v| v / self.initial_value - 1.0)
            .collect()
    }

    fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.final_values.clone();
        if sorted.len() >= PARALLEL_SORT_THRESHOLD {
            sorted.par_sort_unstable_by(f64::total_cmp);
        } else {
            sorted.sort_unstable_by(f64::total_cmp);
        }
        sorted
    }
}

/// Index of the nearest-rank percentile `p` in a sorted sample of size `n`.
///
/// # Examples
/// ```
/// use quant_analytics::statistics::nearest_rank_index;
///
/// assert_eq!(nearest_rank_index(100, 0.05), 5);
/// assert_eq!(nearest_rank_index(100, 0.95), 95);
/// assert_eq!(nearest_rank_index(10, 1.0), 9);
/// ```
#[inline]
pub fn nearest_rank_index(n: usize, p: f64) -> usize {
    let raw = (p * n as f64).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n.saturating_sub(1))
    }
}

/// Nearest-rank percentile of an ascending sample; `None` if empty.
#[inline]
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    sorted.get(nearest_rank_index(sorted.len(), p)).copied()
}

/// Summary of an ensemble's terminal distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationStatistics {
    /// Mean terminal value.
    pub average_ending_value: f64,
    /// Fraction of terminal values above the initial value.
    pub probability_of_gain: f64,
    /// Nearest-rank 5th percentile.
    pub percentile5: f64,
    /// Nearest-rank 95th percentile.
    pub percentile95: f64,
    /// Largest terminal value.
    pub max_value: f64,
    /// Smallest terminal value.
    pub min_value: f64,
    /// Annualised mean return.
    pub annualized_expected_return: f64,
    /// Annualised return volatility.
    pub annualized_volatility: f64,
    /// Annualised Sharpe ratio; 0 when volatility is 0.
    pub sharpe_ratio: f64,
}

/// Tail and ratio risk measures.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RiskMetrics {
    /// Value at risk in currency: initial value minus the tail percentile.
    pub var: f64,
    /// Expected shortfall as a fraction of the initial value.
    pub cvar: f64,
    /// Annualised Sharpe ratio; 0 when volatility is 0.
    pub sharpe: f64,
    /// Annualised Sortino ratio; 0 without downside returns.
    pub sortino: f64,
    /// Worst peak-to-trough decline across paths, as a fraction.
    pub max_drawdown: f64,
}

/// Statistics engine settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct StatisticsConfig {
    /// Periods per year used to annualise.
    pub annualization_factor: f64,
    /// Annual risk-free rate subtracted in Sharpe and Sortino.
    pub risk_free_rate: f64,
    /// Sortino threshold on horizon returns.
    pub target_return: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            annualization_factor: DEFAULT_ANNUALIZATION_FACTOR,
            risk_free_rate: 0.0,
            target_return: 0.0,
        }
    }
}

impl StatisticsConfig {
    /// Validates the settings.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_positive("annualization_factor", self.annualization_factor)?;
        ensure_finite("risk_free_rate", self.risk_free_rate)?;
        ensure_finite("target_return", self.target_return)?;
        Ok(())
    }
}

/// Annualised first two moments of horizon returns.
struct Annualised {
    ret: f64,
    vol: f64,
    scale: f64,
}

/// Computes summaries and risk metrics for ensembles.
///
/// # Examples
///
/// ```rust
/// use quant_analytics::{Ensemble, StatisticsEngine};
///
/// let values: Vec<f64> = (1..=100).map(|i| 50.0 + i as f64).collect();
/// let ensemble = Ensemble::new(100.0, 252, values);
///
/// let stats = StatisticsEngine::default().summarize(&ensemble).unwrap();
/// assert_eq!(stats.percentile5, 56.0);
/// assert_eq!(stats.percentile95, 146.0);
/// assert_eq!(stats.probability_of_gain, 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct StatisticsEngine {
    config: StatisticsConfig,
}

impl StatisticsEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` for a non-positive annualisation
    /// factor or non-finite rates.
    pub fn new(config: StatisticsConfig) -> QuantResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the settings.
    pub fn config(&self) -> &StatisticsConfig {
        &self.config
    }

    fn annualise(&self, ensemble: &Ensemble, returns: &[f64]) -> Annualised {
        let scale = self.config.annualization_factor / ensemble.horizon_days as f64;
        Annualised {
            ret: mean(returns) * scale,
            vol: population_variance(returns).sqrt() * scale.sqrt(),
            scale,
        }
    }

    fn sharpe(&self, annualised: &Annualised) -> f64 {
        ratio_or_zero(annualised.ret - self.config.risk_free_rate, annualised.vol)
    }

    /// Summarises the terminal distribution.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` from [`Ensemble::validate`].
    pub fn summarize(&self, ensemble: &Ensemble) -> QuantResult<SimulationStatistics> {
        ensemble.validate()?;
        let sorted = ensemble.sorted_values();
        let n = sorted.len();
        let returns = ensemble.horizon_returns();
        let annualised = self.annualise(ensemble, &returns);

        let gains = ensemble
            .final_values
            .iter()
            .filter(|v| **v > ensemble.initial_value)
            .count();

        Ok(SimulationStatistics {
            average_ending_value: mean(&sorted),
            probability_of_gain: gains as f64 / n as f64,
            percentile5: sorted[nearest_rank_index(n, 0.05)],
            percentile95: sorted[nearest_rank_index(n, 0.95)],
            max_value: sorted[n - 1],
            min_value: sorted[0],
            annualized_expected_return: annualised.ret,
            annualized_volatility: annualised.vol,
            sharpe_ratio: self.sharpe(&annualised),
        })
    }

    /// Computes VaR, CVaR, Sharpe, Sortino and maximum drawdown.
    ///
    /// `confidence` is the tail probability, e.g. `0.05` for 95% VaR.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` for an invalid ensemble or a
    /// confidence outside `(0, 1)`.
    pub fn risk_metrics(&self, ensemble: &Ensemble, confidence: f64) -> QuantResult<RiskMetrics> {
        ensemble.validate()?;
        if !(confidence > 0.0 && confidence < 1.0) {
            return Err(QuantError::invalid(
                "confidence",
                format!("must be in (0, 1), got {}", confidence),
            ));
        }

        let initial = ensemble.initial_value;
        let sorted = ensemble.sorted_values();
        let cutoff = nearest_rank_index(sorted.len(), confidence);
        let tail_mean = mean(&sorted[..=cutoff]);

        let returns = ensemble.horizon_returns();
        let annualised = self.annualise(ensemble, &returns);
        let sortino = match downside_deviation(&returns, self.config.target_return) {
            Some(dd) => ratio_or_zero(
                annualised.ret - self.config.risk_free_rate,
                dd * annualised.scale.sqrt(),
            ),
            None => {
                tracing::debug!("no returns below target; Sortino set to 0");
                0.0
            }
        };

        let max_drawdown = if ensemble.paths.is_empty() {
            ensemble
                .final_values
                .iter()
                .map(|v| max_drawdown(&[initial, *v]))
                .fold(0.0, f64::max)
        } else {
            ensemble
                .paths
                .iter()
                .map(|path| max_drawdown(path))
                .fold(0.0, f64::max)
        };

        Ok(RiskMetrics {
            var: initial - sorted[cutoff],
            cvar: (initial - tail_mean) / initial,
            sharpe: self.sharpe(&annualised),
            sortino,
            max_drawdown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn hundred() -> Ensemble {
        // 51, 52, ..., 150 in shuffled order
        let values: Vec<f64> = (1..=100).map(|i| 50.0 + ((i * 37) % 100 + 1) as f64).collect();
        Ensemble::new(100.0, 252, values)
    }

    // ==========================================================
    // Percentiles
    // ==========================================================

    #[test]
    fn test_nearest_rank_index_contract() {
        assert_eq!(nearest_rank_index(1, 0.05), 0);
        assert_eq!(nearest_rank_index(19, 0.05), 0);
        assert_eq!(nearest_rank_index(20, 0.05), 1);
        assert_eq!(nearest_rank_index(20, 0.95), 19);
        assert_eq!(nearest_rank_index(5, 0.0), 0);
        assert_eq!(percentile(&[], 0.5), None);
        assert_eq!(percentile(&[1.0, 2.0, 3.0], 0.5), Some(2.0));
    }

    // ==========================================================
    // Summary
    // ==========================================================

    #[test]
    fn test_summary_of_known_sample() {
        let stats = StatisticsEngine::default().summarize(&hundred()).unwrap();
        assert_eq!(stats.min_value, 51.0);
        assert_eq!(stats.max_value, 150.0);
        assert_eq!(stats.percentile5, 56.0);
        assert_eq!(stats.percentile95, 146.0);
        assert_relative_eq!(stats.average_ending_value, 100.5, epsilon = 1e-12);
        assert_eq!(stats.probability_of_gain, 0.5);
        // One-year horizon: annualised figures equal horizon figures
        assert_relative_eq!(stats.annualized_expected_return, 0.005, epsilon = 1e-12);
        let pop_sd = (9999.0_f64 / 12.0).sqrt() / 100.0;
        assert_relative_eq!(stats.annualized_volatility, pop_sd, epsilon = 1e-12);
        assert_relative_eq!(stats.sharpe_ratio, 0.005 / pop_sd, epsilon = 1e-9);
    }

    #[test]
    fn test_annualisation_scales_with_horizon() {
        let ensemble = Ensemble::new(100.0, 63, vec![98.0, 101.0, 104.0, 105.0]);
        let stats = StatisticsEngine::default().summarize(&ensemble).unwrap();
        // mean horizon return 0.02, quarter horizon
        assert_relative_eq!(stats.annualized_expected_return, 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_volatility_sharpe_sentinel() {
        let ensemble = Ensemble::new(100.0, 10, vec![110.0; 50]);
        let engine = StatisticsEngine::default();
        let stats = engine.summarize(&ensemble).unwrap();
        assert!(stats.annualized_volatility < 1e-12);
        assert_eq!(stats.sharpe_ratio, 0.0);

        let risk = engine.risk_metrics(&ensemble, 0.05).unwrap();
        assert_eq!(risk.sharpe, 0.0);
        assert_eq!(risk.sortino, 0.0);
        assert_eq!(risk.max_drawdown, 0.0);
    }

    #[test]
    fn test_invalid_ensembles_rejected() {
        let engine = StatisticsEngine::default();
        assert!(engine.summarize(&Ensemble::new(100.0, 10, vec![])).is_err());
        assert!(engine.summarize(&Ensemble::new(0.0, 10, vec![1.0])).is_err());
        assert!(engine.summarize(&Ensemble::new(100.0, 0, vec![1.0])).is_err());
        assert!(engine.summarize(&Ensemble::new(100.0, 10, vec![f64::NAN])).is_err());
        assert!(StatisticsEngine::new(StatisticsConfig {
            annualization_factor: 0.0,
            ..Default::default()
        })
        .is_err());
    }

    // ==========================================================
    // Risk metrics
    // ==========================================================

    #[test]
    fn test_var_and_cvar() {
        let risk = StatisticsEngine::default().risk_metrics(&hundred(), 0.05).unwrap();
        // Sorted index 5 holds 56; tail is 51..=56
        assert_eq!(risk.var, 44.0);
        assert_relative_eq!(risk.cvar, (100.0 - 53.5) / 100.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sortino_uses_downside_only() {
        let ensemble = Ensemble::new(100.0, 252, vec![90.0, 110.0, 120.0, 80.0]);
        let risk = StatisticsEngine::default().risk_metrics(&ensemble, 0.25).unwrap();
        // Mean return is zero up to rounding
        assert!(risk.sharpe.abs() < 1e-12);
        assert!(risk.sortino.abs() < 1e-12);

        let ensemble = Ensemble::new(100.0, 252, vec![90.0, 120.0, 130.0, 100.0]);
        let risk = StatisticsEngine::default().risk_metrics(&ensemble, 0.25).unwrap();
        // mean 0.1, downside deviation 0.1 (only -0.1 below target)
        assert_relative_eq!(risk.sortino, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_drawdown_from_paths_and_fallback() {
        let engine = StatisticsEngine::default();
        let ensemble = Ensemble::new(100.0, 2, vec![120.0, 95.0])
            .with_paths(vec![vec![100.0, 60.0, 120.0], vec![100.0, 105.0, 95.0]]);
        let risk = engine.risk_metrics(&ensemble, 0.05).unwrap();
        assert_relative_eq!(risk.max_drawdown, 0.4, epsilon = 1e-12);

        let lean = Ensemble::new(100.0, 2, vec![120.0, 95.0]);
        let risk = engine.risk_metrics(&lean, 0.05).unwrap();
        assert_relative_eq!(risk.max_drawdown, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_confidence_bounds() {
        let engine = StatisticsEngine::default();
        assert!(engine.risk_metrics(&hundred(), 0.0).is_err());
        assert!(engine.risk_metrics(&hundred(), 1.0).is_err());
        assert!(engine.risk_metrics(&hundred(), f64::NAN).is_err());
    }
}
