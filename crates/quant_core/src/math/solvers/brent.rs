//! Brent's bracketing root finder.

use super::{finite, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Result of [`BrentSolver::find_root`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrentOutcome<T: Float> {
    /// Best iterate.
    pub root: T,
    /// Number of bracket updates performed.
    pub iterations: usize,
    /// `f(root)`.
    pub residual: T,
}

/// Brent's method: inverse quadratic interpolation and secant steps, with a
/// bisection step whenever the interpolated point would leave the bracket or
/// shrink it too slowly.
///
/// The bracket always keeps a sign change, so the method cannot diverge. It
/// stops once `|f(b)| < tolerance` or the bracket is narrower than
/// `tolerance`.
///
/// # Example
///
/// ```
/// use quant_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let outcome = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(outcome.root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Solver with the given stopping rule.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Stopping rule in use.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` between `a` and `b`.
    ///
    /// # Errors
    ///
    /// - `SolverError::NoBracket` if `f(a)` and `f(b)` have the same sign
    /// - `SolverError::MaxIterationsExceeded` if the budget runs out
    /// - `SolverError::NumericalInstability` if `f` returns a non-finite value
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<BrentOutcome<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two = T::one() + T::one();
        let three = two + T::one();
        let half = T::one() / two;
        let tolerance = self.config.tolerance;

        let (mut a, mut b) = (a, b);
        let mut fa = finite(f(a), a)?;
        let mut fb = finite(f(b), b)?;
        if fa == T::zero() {
            return Ok(BrentOutcome {
                root: a,
                iterations: 0,
                residual: fa,
            });
        }
        if fa.signum() == fb.signum() && fb != T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // `c` is the far end of the bracket: f(b) and f(c) always differ in sign
        let (mut c, mut fc) = (b, fb);
        let mut step = b - a;
        let mut previous_step = step;

        for iteration in 0..self.config.max_iterations {
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                step = b - a;
                previous_step = step;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let slack = two * T::epsilon() * b.abs() + half * tolerance;
            let midpoint = half * (c - b);
            if fb.abs() < tolerance || midpoint.abs() <= slack {
                return Ok(BrentOutcome {
                    root: b,
                    iterations: iteration,
                    residual: fb,
                });
            }

            if previous_step.abs() >= slack && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // secant
                    (two * midpoint * s, T::one() - s)
                } else {
                    // inverse quadratic
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (two * midpoint * q * (q - r) - (b - a) * (r - T::one())),
                        (q - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();
                let limit = (three * midpoint * q - (slack * q).abs()).min((previous_step * q).abs());
                if two * p < limit {
                    previous_step = step;
                    step = p / q;
                } else {
                    step = midpoint;
                    previous_step = step;
                }
            } else {
                step = midpoint;
                previous_step = step;
            }

            a = b;
            fa = fb;
            b = if step.abs() > slack {
                b + step
            } else if midpoint > T::zero() {
                b + slack
            } else {
                b - slack
            };
            fb = finite(f(b), b)?;
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
            last: b.to_f64().unwrap_or(f64::NAN),
        })
    }
}
