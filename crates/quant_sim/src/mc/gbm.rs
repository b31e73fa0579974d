//! Daily log-space GBM step.

use super::config::TRADING_DAYS_PER_YEAR;

/// Precomputed coefficients of one daily step.
///
/// ```text
/// S(t+dt) = S(t) × exp((μ - ½σ²)dt + σ√dt × Z),   dt = 1/252
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmStep {
    drift: f64,
    diffusion: f64,
}

impl GbmStep {
    /// Coefficients for annualised drift `expected_return` and volatility.
    #[inline]
    pub fn new(expected_return: f64, volatility: f64) -> Self {
        let dt = 1.0 / TRADING_DAYS_PER_YEAR;
        Self {
            drift: (expected_return - 0.5 * volatility * volatility) * dt,
            diffusion: volatility * dt.sqrt(),
        }
    }

    /// `(μ - ½σ²)·dt`.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// `σ·√dt`.
    #[inline]
    pub fn diffusion(&self) -> f64 {
        self.diffusion
    }

    /// Log-return for shock `z`.
    #[inline]
    pub fn log_return(&self, z: f64) -> f64 {
        self.drift + self.diffusion * z
    }
}
