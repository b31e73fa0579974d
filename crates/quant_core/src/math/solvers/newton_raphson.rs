//! Bounded Newton-Raphson iteration.

use super::{finite, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Why a bounded Newton iteration stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `|f(x)| < tolerance`.
    Converged,
    /// The iteration budget ran out.
    IterationLimit,
    /// `|f'(x)|` fell below the division threshold.
    FlatDerivative,
}

/// Result of [`NewtonRaphsonSolver::find_root_bounded`].
///
/// The solver always reports its best iterate; `converged` tells the caller
/// whether it can be trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonOutcome<T: Float> {
    /// Final iterate.
    pub root: T,
    /// `true` iff `|f(root)| < tolerance`.
    pub converged: bool,
    /// Number of Newton updates performed.
    pub iterations: usize,
    /// `f(root)`.
    pub residual: T,
    /// Stop reason.
    pub termination: Termination,
}

/// Newton-Raphson root finder with an explicit derivative.
///
/// Each step moves to `x - f(x)/f'(x)` and is then clamped into the search
/// interval, so a poor starting point or a function that flattens near the
/// edges leaves the iterate pinned at a bound instead of escaping to
/// infinity. Convergence is quadratic near a simple root.
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Solver with the given stopping rule.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Stopping rule in use.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in `[lower, upper]` starting from `x0`.
    ///
    /// Each step computes `x - f(x)/f'(x)` and clamps it into the interval.
    /// Running out of iterations or hitting a flat derivative is not an error:
    /// the last iterate is returned with `converged = false`.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if `f` or `f'` returns a non-finite
    /// value.
    ///
    /// # Example
    ///
    /// ```
    /// use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let outcome = solver.find_root_bounded(f, f_prime, 1.5, 0.0, 3.0).unwrap();
    /// assert!(outcome.converged);
    /// assert!(f(outcome.root).abs() < 1e-10);
    /// ```
    pub fn find_root_bounded<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<NewtonOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let epsilon = T::from(1e-30).unwrap_or_else(T::min_positive_value);
        let mut x = clamp(x0, lower, upper);
        let mut f_val = finite(f(x), x)?;

        for iteration in 0..self.config.max_iterations {
            if f_val.abs() < self.config.tolerance {
                return Ok(NewtonOutcome {
                    root: x,
                    converged: true,
                    iterations: iteration,
                    residual: f_val,
                    termination: Termination::Converged,
                });
            }

            let f_prime_val = finite(f_prime(x), x)?;
            if f_prime_val.abs() < epsilon {
                return Ok(NewtonOutcome {
                    root: x,
                    converged: false,
                    iterations: iteration,
                    residual: f_val,
                    termination: Termination::FlatDerivative,
                });
            }

            x = clamp(x - f_val / f_prime_val, lower, upper);
            f_val = finite(f(x), x)?;
        }

        let converged = f_val.abs() < self.config.tolerance;
        Ok(NewtonOutcome {
            root: x,
            converged,
            iterations: self.config.max_iterations,
            residual: f_val,
            termination: if converged {
                Termination::Converged
            } else {
                Termination::IterationLimit
            },
        })
    }
}

#[inline]
fn clamp<T: Float>(x: T, lower: T, upper: T) -> T {
    x.max(lower).min(upper)
}
