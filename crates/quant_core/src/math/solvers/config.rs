//! Stopping rules shared by the root finders.

use num_traits::Float;

/// Residual threshold used by [`SolverConfig::default`].
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Iteration budget used by [`SolverConfig::default`].
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// When a root finder stops.
///
/// A run is converged once `|f(x)| < tolerance`; it gives up after
/// `max_iterations` updates.
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::SolverConfig;
///
/// let loose = SolverConfig::new(1e-4, 100);
/// assert_eq!(loose.tolerance, 1e-4);
///
/// let tight: SolverConfig<f64> = SolverConfig::default().with_max_iterations(500);
/// assert_eq!(tight.tolerance, 1e-10);
/// assert_eq!(tight.max_iterations, 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Residual threshold on `|f(x)|`.
    pub tolerance: T,
    /// Update budget.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    fn default() -> Self {
        Self::new(
            T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::epsilon),
            DEFAULT_MAX_ITERATIONS,
        )
    }
}

impl<T: Float> SolverConfig<T> {
    /// Stopping rule with the given threshold and budget.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Replaces the residual threshold.
    pub fn with_tolerance(self, tolerance: T) -> Self {
        Self { tolerance, ..self }
    }

    /// Replaces the update budget.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self {
            max_iterations,
            ..self
        }
    }
}
