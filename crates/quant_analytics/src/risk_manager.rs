//! Portfolio-versus-benchmark risk ratios from periodic return series.

use quant_core::types::validation::{ensure_finite, ensure_positive};
use quant_core::{QuantError, QuantResult};

use crate::moments::{
    downside_deviation, max_drawdown, mean, ratio_or_zero, sample_covariance, sample_variance,
    MIN_DENOMINATOR,
};
use crate::statistics::DEFAULT_ANNUALIZATION_FACTOR;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Benchmark-relative ratios.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RatioReport {
    /// `cov(p, b) / var(b)`; 0 for a constant benchmark.
    pub beta: f64,
    /// Annualised Jensen's alpha.
    pub alpha: f64,
    /// Annualised standard deviation of active returns.
    pub tracking_error: f64,
    /// Annualised active return over tracking error; 0 when TE is 0.
    pub information_ratio: f64,
}

/// Computes risk ratios from periodic returns.
///
/// Series are simple periodic returns (e.g. daily), oldest first. Moments
/// are sample moments (divide by `n - 1`).
///
/// # Examples
/// ```
/// use quant_analytics::RiskManager;
///
/// let benchmark = [0.01, -0.02, 0.015, 0.005, -0.01];
/// let levered: Vec<f64> = benchmark.iter().map(|r| 2.0 * r).collect();
///
/// let report = RiskManager::default().ratios(&levered, &benchmark).unwrap();
/// assert!((report.beta - 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskManager {
    annualization_factor: f64,
    risk_free_rate: f64,
}

impl Default for RiskManager {
    fn default() -> Self {
        Self {
            annualization_factor: DEFAULT_ANNUALIZATION_FACTOR,
            risk_free_rate: 0.0,
        }
    }
}

impl RiskManager {
    /// Creates a risk manager for `annualization_factor` periods per year
    /// and an annual `risk_free_rate`.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for a non-positive factor or a
    /// non-finite rate.
    pub fn new(annualization_factor: f64, risk_free_rate: f64) -> QuantResult<Self> {
        ensure_positive("annualization_factor", annualization_factor)?;
        ensure_finite("risk_free_rate", risk_free_rate)?;
        Ok(Self {
            annualization_factor,
            risk_free_rate,
        })
    }

    /// Risk-free rate per period.
    #[inline]
    fn periodic_rf(&self) -> f64 {
        self.risk_free_rate / self.annualization_factor
    }

    /// Beta, alpha, tracking error and information ratio of `portfolio`
    /// against `benchmark`.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` if the series differ in length, have
    /// fewer than two points, or contain non-finite values.
    pub fn ratios(&self, portfolio: &[f64], benchmark: &[f64]) -> QuantResult<RatioReport> {
        validate_series("portfolio", portfolio)?;
        validate_series("benchmark", benchmark)?;
        if portfolio.len() != benchmark.len() {
            return Err(QuantError::invalid(
                "benchmark",
                format!(
                    "length {} differs from portfolio length {}",
                    benchmark.len(),
                    portfolio.len()
                ),
            ));
        }

        let factor = self.annualization_factor;
        let rf = self.periodic_rf();

        let benchmark_variance = sample_variance(benchmark);
        let beta = ratio_or_zero(sample_covariance(portfolio, benchmark), benchmark_variance);
        if benchmark_variance.abs() < MIN_DENOMINATOR {
            tracing::warn!("benchmark returns are constant; beta reported as 0");
        }

        let alpha = (mean(portfolio) - rf - beta * (mean(benchmark) - rf)) * factor;

        let active: Vec<f64> = portfolio.iter().zip(benchmark).map(|(p, b)| p - b).collect();
        let tracking_error = sample_variance(&active).sqrt() * factor.sqrt();
        let information_ratio = ratio_or_zero(mean(&active) * factor, tracking_error);

        Ok(RatioReport {
            beta,
            alpha,
            tracking_error,
            information_ratio,
        })
    }

    /// Annualised Sharpe ratio of a return series; 0 for zero volatility.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for fewer than two points or
    /// non-finite values.
    pub fn sharpe_ratio(&self, returns: &[f64]) -> QuantResult<f64> {
        validate_series("returns", returns)?;
        let factor = self.annualization_factor;
        let excess = (mean(returns) - self.periodic_rf()) * factor;
        Ok(ratio_or_zero(excess, sample_variance(returns).sqrt() * factor.sqrt()))
    }

    /// Annualised Sortino ratio against a per-period `target`; 0 when no
    /// return falls below it.
    ///
    /// # Errors
    /// As [`sharpe_ratio`](Self::sharpe_ratio), plus a non-finite target.
    pub fn sortino_ratio(&self, returns: &[f64], target: f64) -> QuantResult<f64> {
        validate_series("returns", returns)?;
        ensure_finite("target", target)?;
        let factor = self.annualization_factor;
        let excess = (mean(returns) - self.periodic_rf()) * factor;
        Ok(match downside_deviation(returns, target) {
            Some(dd) => ratio_or_zero(excess, dd * factor.sqrt()),
            None => 0.0,
        })
    }

    /// Maximum drawdown of an equity curve (levels, not returns).
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for an empty curve or non-positive or
    /// non-finite levels.
    pub fn max_drawdown(&self, equity_curve: &[f64]) -> QuantResult<f64> {
        if equity_curve.is_empty() {
            return Err(QuantError::invalid("equity_curve", "must not be empty"));
        }
        for &level in equity_curve {
            ensure_positive("equity_curve", level)?;
        }
        Ok(max_drawdown(equity_curve))
    }
}

fn validate_series(name: &'static str, series: &[f64]) -> QuantResult<()> {
    if series.len() < 2 {
        return Err(QuantError::invalid(name, "needs at least 2 observations"));
    }
    for &value in series {
        ensure_finite(name, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BENCHMARK: [f64; 5] = [0.01, -0.02, 0.015, 0.005, -0.01];

    #[test]
    fn test_hand_computed_ratios() {
        let portfolio = [0.02, -0.01, 0.01, 0.01, 0.0];
        let manager = RiskManager::new(252.0, 0.0).unwrap();
        let report = manager.ratios(&portfolio, &BENCHMARK).unwrap();

        // mean_b = 0, var_b = 0.00085 / 4, cov = 0.0006 / 4
        assert_relative_eq!(report.beta, 0.6 / 0.85, epsilon = 1e-12);
        // mean_p = 0.006
        assert_relative_eq!(report.alpha, 0.006 * 252.0, epsilon = 1e-12);

        // active = [0.01, 0.01, -0.005, 0.005, 0.01], mean 0.006
        let active_var = (0.000016_f64 * 3.0 + 0.000121 + 0.000001) / 4.0;
        let te = active_var.sqrt() * 252.0_f64.sqrt();
        assert_relative_eq!(report.tracking_error, te, epsilon = 1e-12);
        assert_relative_eq!(report.information_ratio, 0.006 * 252.0 / te, epsilon = 1e-9);
    }

    #[test]
    fn test_identical_series() {
        let report = RiskManager::default().ratios(&BENCHMARK, &BENCHMARK).unwrap();
        assert_relative_eq!(report.beta, 1.0, epsilon = 1e-12);
        assert_relative_eq!(report.alpha, 0.0, epsilon = 1e-12);
        assert_eq!(report.tracking_error, 0.0);
        assert_eq!(report.information_ratio, 0.0);
    }

    #[test]
    fn test_alpha_nets_risk_free_rate() {
        let manager = RiskManager::new(252.0, 0.0252).unwrap();
        let report = manager.ratios(&BENCHMARK, &BENCHMARK).unwrap();
        assert_relative_eq!(report.alpha, 0.0, epsilon = 1e-12);

        let shifted: Vec<f64> = BENCHMARK.iter().map(|r| r + 0.001).collect();
        let report = manager.ratios(&shifted, &BENCHMARK).unwrap();
        assert_relative_eq!(report.alpha, 0.252, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_benchmark_beta_sentinel() {
        let report = RiskManager::default()
            .ratios(&[0.01, 0.02, 0.03], &[0.001, 0.001, 0.001])
            .unwrap();
        assert_eq!(report.beta, 0.0);
        assert!(report.alpha.is_finite());
    }

    #[test]
    fn test_series_validation() {
        let manager = RiskManager::default();
        assert!(manager.ratios(&[0.01], &[0.01]).is_err());
        assert!(manager.ratios(&[0.01, 0.02], &[0.01, 0.02, 0.03]).is_err());
        assert!(manager.ratios(&[0.01, f64::NAN], &[0.01, 0.02]).is_err());
        assert!(manager.sharpe_ratio(&[]).is_err());
        assert!(RiskManager::new(0.0, 0.0).is_err());
    }

    #[test]
    fn test_series_sharpe_and_sortino() {
        let manager = RiskManager::new(4.0, 0.0).unwrap();
        let returns = [0.1, -0.1, 0.2, 0.0];
        // mean 0.05, sample sd sqrt(0.05 / 3)
        let sharpe = manager.sharpe_ratio(&returns).unwrap();
        assert_relative_eq!(sharpe, 0.05 * 4.0 / ((0.05_f64 / 3.0).sqrt() * 2.0), epsilon = 1e-12);

        // downside deviation 0.1
        let sortino = manager.sortino_ratio(&returns, 0.0).unwrap();
        assert_relative_eq!(sortino, 0.2 / 0.2, epsilon = 1e-12);

        assert_eq!(manager.sortino_ratio(&[0.01, 0.02], 0.0).unwrap(), 0.0);
        assert_eq!(manager.sharpe_ratio(&[0.01, 0.01]).unwrap(), 0.0);
    }

    #[test]
    fn test_equity_curve_drawdown() {
        let manager = RiskManager::default();
        assert_relative_eq!(manager.max_drawdown(&[100.0, 125.0, 100.0, 110.0]).unwrap(), 0.2, epsilon = 1e-12);
        assert!(manager.max_drawdown(&[]).is_err());
        assert!(manager.max_drawdown(&[100.0, -1.0]).is_err());
    }
}
