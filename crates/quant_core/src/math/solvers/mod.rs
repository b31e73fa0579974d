//! Root-finding solvers for numerical computation.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Quadratic convergence using an explicit
//!   derivative, with the iterate clamped to a search interval every step
//! - [`BrentSolver`]: Derivative-free, needs a sign change over the bracket
//!   and cannot leave it
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use quant_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2) inside [0, 10]
//! let solver = NewtonRaphsonSolver::new(SolverConfig::default());
//!
//! let outcome = solver
//!     .find_root_bounded(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0, 0.0, 10.0)
//!     .unwrap();
//! assert!(outcome.converged);
//! assert!((outcome.root - std::f64::consts::SQRT_2).abs() < 1e-10);
//! ```

mod brent;
mod config;
mod newton_raphson;

pub use brent::{BrentOutcome, BrentSolver};
pub use config::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
pub use newton_raphson::{NewtonOutcome, NewtonRaphsonSolver, Termination};

use crate::types::SolverError;
use num_traits::Float;

#[inline]
fn finite<T: Float>(value: T, x: T) -> Result<T, SolverError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SolverError::NumericalInstability(format!(
            "non-finite function value at x = {}",
            x.to_f64().unwrap_or(f64::NAN)
        )))
    }
}
