//! Simulation inputs and run configuration.

use quant_core::types::validation::{ensure_finite, ensure_in_range, ensure_non_negative, ensure_positive};
use quant_core::QuantResult;

use super::error::SimulationError;
use crate::parallel::ParallelConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trading days per year; one simulation step is `1 / TRADING_DAYS_PER_YEAR`.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum horizon (one hundred trading years).
pub const MAX_HORIZON_DAYS: usize = 25_200;

/// Single-asset GBM inputs.
///
/// # Examples
///
/// ```rust
/// use quant_sim::mc::SimulationParameters;
///
/// let params = SimulationParameters::new(100.0, 0.07, 0.2, 252, 10_000);
/// assert!(params.validate().is_ok());
/// assert!(SimulationParameters::new(0.0, 0.07, 0.2, 252, 10_000).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SimulationParameters {
    /// Starting price.
    pub current_price: f64,
    /// Annualised drift (μ).
    pub expected_return: f64,
    /// Annualised volatility (σ).
    pub volatility: f64,
    /// Horizon in trading days.
    pub time_horizon_days: usize,
    /// Number of independent paths.
    pub num_paths: usize,
}

impl SimulationParameters {
    /// Creates new parameters.
    #[inline]
    pub fn new(
        current_price: f64,
        expected_return: f64,
        volatility: f64,
        time_horizon_days: usize,
        num_paths: usize,
    ) -> Self {
        Self {
            current_price,
            expected_return,
            volatility,
            time_horizon_days,
            num_paths,
        }
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` if the price is not positive, drift or
    /// volatility is not finite, volatility is negative, or either count is
    /// zero or above its cap.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_positive("current_price", self.current_price)?;
        ensure_finite("expected_return", self.expected_return)?;
        ensure_non_negative("volatility", self.volatility)?;
        validate_counts(self.time_horizon_days, self.num_paths)
    }
}

/// Checks horizon and path count against their caps.
pub(crate) fn validate_counts(time_horizon_days: usize, num_paths: usize) -> QuantResult<()> {
    if time_horizon_days == 0 || time_horizon_days > MAX_HORIZON_DAYS {
        return Err(SimulationError::InvalidHorizon(time_horizon_days).into());
    }
    if num_paths == 0 || num_paths > MAX_PATHS {
        return Err(SimulationError::InvalidPathCount(num_paths).into());
    }
    Ok(())
}

/// Poisson-style jump overlay applied to daily log-returns.
///
/// On each day a uniform draw below `jump_intensity` adds
/// `jump_mean + jump_std·Z'` to that day's log-return.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct JumpConfig {
    /// Probability of a jump on any given day, in `[0, 1]`.
    pub jump_intensity: f64,
    /// Mean log-jump size.
    pub jump_mean: f64,
    /// Standard deviation of the log-jump size.
    pub jump_std: f64,
}

impl JumpConfig {
    /// Creates a jump overlay.
    pub fn new(jump_intensity: f64, jump_mean: f64, jump_std: f64) -> Self {
        Self {
            jump_intensity,
            jump_mean,
            jump_std,
        }
    }

    /// Validates the overlay.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` if the intensity is outside `[0, 1]`,
    /// the mean is not finite or the standard deviation is negative.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_in_range("jump_intensity", self.jump_intensity, 0.0, 1.0)?;
        ensure_finite("jump_mean", self.jump_mean)?;
        ensure_non_negative("jump_std", self.jump_std)?;
        Ok(())
    }
}

/// How a simulation runs, as opposed to what it simulates.
///
/// Use [`SimulationConfig::builder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use quant_sim::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .seed(7)
///     .keep_paths(false)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.seed(), Some(7));
/// assert!(!config.keep_paths());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    seed: Option<u64>,
    keep_paths: bool,
    parallel: ParallelConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            keep_paths: true,
            parallel: ParallelConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Master seed, or `None` to draw one from entropy per run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Whether full paths are returned alongside final values.
    #[inline]
    pub fn keep_paths(&self) -> bool {
        self.keep_paths
    }

    /// Rayon fan-out settings.
    #[inline]
    pub fn parallel(&self) -> &ParallelConfig {
        &self.parallel
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    seed: Option<u64>,
    keep_paths: bool,
    batch_size: usize,
    parallel_threshold: usize,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        let parallel = ParallelConfig::default();
        Self {
            seed: None,
            keep_paths: true,
            batch_size: parallel.batch_size,
            parallel_threshold: parallel.parallel_threshold,
        }
    }
}

impl SimulationConfigBuilder {
    /// Sets the master seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the master seed if one is given.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Keep (default) or drop per-day paths.
    #[inline]
    pub fn keep_paths(mut self, keep_paths: bool) -> Self {
        self.keep_paths = keep_paths;
        self
    }

    /// Minimum paths per rayon task.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Path count from which rayon is used; `usize::MAX` disables it.
    #[inline]
    pub fn parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidBatchSize` for a batch size of zero.
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        if self.batch_size == 0 {
            return Err(SimulationError::InvalidBatchSize(self.batch_size));
        }
        Ok(SimulationConfig {
            seed: self.seed,
            keep_paths: self.keep_paths,
            parallel: ParallelConfig::new(self.batch_size, self.parallel_threshold),
        })
    }
}
