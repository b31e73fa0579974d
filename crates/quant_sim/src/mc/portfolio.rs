//! Correlated multi-asset portfolio simulation.
//!
//! Per day each path draws one independent normal per asset, correlates
//! them through the lower Cholesky factor `L` (`ε = L·z`) and advances
//! every asset with its own GBM step. Portfolio value is `Σ wᵢ·Sᵢ`.

use quant_core::math::correlation::{CholeskyFactor, CorrelationMatrix};
use quant_core::types::validation::{ensure_finite, ensure_in_range, ensure_non_negative, ensure_positive};
use quant_core::QuantResult;

use super::config::{validate_counts, SimulationConfig};
use super::error::SimulationError;
use super::gbm::GbmStep;
use crate::parallel::map_indices;
use crate::rng::{PathStreams, RandomSource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One holding in a simulated portfolio.
///
/// Weights are used as given; they are not normalised.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PortfolioAsset {
    /// Identifier, carried through for reporting.
    pub ticker: String,
    /// Portfolio weight in `[0, 1]`.
    pub weight: f64,
    /// Starting price.
    pub current_price: f64,
    /// Annualised drift.
    pub expected_return: f64,
    /// Annualised volatility.
    pub volatility: f64,
}

impl PortfolioAsset {
    /// Creates an asset.
    pub fn new(
        ticker: impl Into<String>,
        weight: f64,
        current_price: f64,
        expected_return: f64,
        volatility: f64,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            weight,
            current_price,
            expected_return,
            volatility,
        }
    }

    /// Validates the asset.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` for a weight outside `[0, 1]`, a
    /// non-positive price, a negative volatility or a non-finite drift.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_in_range("weight", self.weight, 0.0, 1.0)?;
        ensure_positive("current_price", self.current_price)?;
        ensure_finite("expected_return", self.expected_return)?;
        ensure_non_negative("volatility", self.volatility)?;
        Ok(())
    }
}

/// Output of a portfolio simulation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PortfolioResults {
    /// `Σ wᵢ·Sᵢ(0)`.
    pub initial_value: f64,
    /// Portfolio value per day for each simulation, starting at
    /// `initial_value`. Empty when paths are not kept.
    pub paths: Vec<Vec<f64>>,
    /// Terminal portfolio value per simulation.
    pub final_values: Vec<f64>,
    /// Terminal price of every asset, per simulation, in asset order.
    pub asset_final_prices: Vec<Vec<f64>>,
}

struct PathRun {
    path: Vec<f64>,
    final_value: f64,
    asset_prices: Vec<f64>,
}

/// Simulates correlated asset prices and the resulting portfolio value.
///
/// # Examples
///
/// ```rust
/// use quant_core::math::correlation::CorrelationMatrix;
/// use quant_sim::mc::{CorrelatedPathSimulator, PortfolioAsset, SimulationConfig};
///
/// let assets = vec![
///     PortfolioAsset::new("AAA", 0.6, 100.0, 0.08, 0.2),
///     PortfolioAsset::new("BBB", 0.4, 50.0, 0.05, 0.3),
/// ];
/// let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.3], vec![0.3, 1.0]]).unwrap();
/// let config = SimulationConfig::builder().seed(1).build().unwrap();
///
/// let simulator = CorrelatedPathSimulator::new(assets, &corr, 21, 100, config).unwrap();
/// let results = simulator.simulate();
/// assert_eq!(results.initial_value, 80.0);
/// assert_eq!(results.final_values.len(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct CorrelatedPathSimulator {
    assets: Vec<PortfolioAsset>,
    steps: Vec<GbmStep>,
    cholesky: CholeskyFactor,
    time_horizon_days: usize,
    num_paths: usize,
    config: SimulationConfig,
}

impl CorrelatedPathSimulator {
    /// Validates every input and factorises the correlation matrix.
    ///
    /// # Errors
    ///
    /// - `QuantError::InvalidParameter` for an empty portfolio, an invalid
    ///   asset, all-zero weights, or a zero or oversized horizon or path count
    /// - `QuantError::InvalidCorrelationMatrix` if the matrix size differs
    ///   from the asset count or the matrix is not positive definite
    pub fn new(
        assets: Vec<PortfolioAsset>,
        correlation: &CorrelationMatrix,
        time_horizon_days: usize,
        num_paths: usize,
        config: SimulationConfig,
    ) -> QuantResult<Self> {
        if assets.is_empty() {
            return Err(SimulationError::EmptyPortfolio.into());
        }
        for asset in &assets {
            asset.validate()?;
        }
        if assets.iter().all(|a| a.weight == 0.0) {
            return Err(SimulationError::ZeroInitialValue.into());
        }
        validate_counts(time_horizon_days, num_paths)?;
        if correlation.dim() != assets.len() {
            return Err(SimulationError::DimensionMismatch {
                assets: assets.len(),
                matrix: correlation.dim(),
            }
            .into());
        }
        let cholesky = correlation.cholesky()?;

        let steps = assets
            .iter()
            .map(|a| GbmStep::new(a.expected_return, a.volatility))
            .collect();

        Ok(Self {
            assets,
            steps,
            cholesky,
            time_horizon_days,
            num_paths,
            config,
        })
    }

    /// Returns the assets in simulation order.
    #[inline]
    pub fn assets(&self) -> &[PortfolioAsset] {
        &self.assets
    }

    /// Returns the Cholesky factor in use.
    #[inline]
    pub fn cholesky(&self) -> &CholeskyFactor {
        &self.cholesky
    }

    /// `Σ wᵢ·Sᵢ(0)`.
    pub fn initial_value(&self) -> f64 {
        self.assets.iter().map(|a| a.weight * a.current_price).sum()
    }

    /// Runs every path sequentially on draws from `rng`.
    pub fn simulate_with<R: RandomSource>(&self, rng: &mut R) -> PortfolioResults {
        let runs: Vec<_> = (0..self.num_paths).map(|_| self.run_path(rng)).collect();
        self.assemble(runs)
    }

    /// Runs with the configured seed, or a fresh entropy seed if none is set.
    pub fn simulate(&self) -> PortfolioResults {
        let seed = self.config.seed().unwrap_or_else(rand::random);
        self.simulate_seeded(seed)
    }

    /// Runs with per-path streams under `seed`.
    pub fn simulate_seeded(&self, seed: u64) -> PortfolioResults {
        tracing::debug!(
            seed,
            num_paths = self.num_paths,
            days = self.time_horizon_days,
            assets = self.assets.len(),
            "simulating correlated portfolio"
        );
        let streams = PathStreams::new(seed);
        let runs = map_indices(self.num_paths, self.config.parallel(), |i| {
            let mut rng = streams.stream(i);
            self.run_path(&mut rng)
        });
        self.assemble(runs)
    }

    fn portfolio_value(&self, prices: &[f64]) -> f64 {
        self.assets.iter().zip(prices).map(|(a, p)| a.weight * p).sum()
    }

    fn run_path<R: RandomSource>(&self, rng: &mut R) -> PathRun {
        let n = self.assets.len();
        let keep = self.config.keep_paths();
        let mut prices: Vec<f64> = self.assets.iter().map(|a| a.current_price).collect();
        let mut independent = vec![0.0; n];
        let mut correlated = vec![0.0; n];
        let mut path = Vec::with_capacity(if keep { self.time_horizon_days + 1 } else { 0 });
        if keep {
            path.push(self.portfolio_value(&prices));
        }

        for _ in 0..self.time_horizon_days {
            rng.fill_normal(&mut independent);
            self.cholesky.transform_into(&independent, &mut correlated);
            for ((price, step), shock) in prices.iter_mut().zip(&self.steps).zip(&correlated) {
                *price *= step.log_return(*shock).exp();
            }
            if keep {
                path.push(self.portfolio_value(&prices));
            }
        }

        PathRun {
            path,
            final_value: self.portfolio_value(&prices),
            asset_prices: prices,
        }
    }

    fn assemble(&self, runs: Vec<PathRun>) -> PortfolioResults {
        let mut results = PortfolioResults {
            initial_value: self.initial_value(),
            paths: Vec::with_capacity(if self.config.keep_paths() { runs.len() } else { 0 }),
            final_values: Vec::with_capacity(runs.len()),
            asset_final_prices: Vec::with_capacity(runs.len()),
        };
        for run in runs {
            if self.config.keep_paths() {
                results.paths.push(run.path);
            }
            results.final_values.push(run.final_value);
            results.asset_final_prices.push(run.asset_prices);
        }
        results
    }
}
