//! Error types for structured error handling.
//!
//! This module provides:
//! - `QuantError`: The top-level taxonomy every public operation returns
//! - `CorrelationError`: Errors from correlation matrix validation and Cholesky
//! - `SolverError`: Errors from root-finding solvers
//!
//! Layer-specific errors convert into [`QuantError`] through `From`, so callers
//! at the API boundary only ever match on four variants.

use thiserror::Error;

/// Convenience alias used by every fallible operation in the workspace.
pub type QuantResult<T> = Result<T, QuantError>;

/// Categorised calculation-core errors.
///
/// # Variants
/// - `InvalidParameter`: Out-of-domain input, rejected before any work starts
/// - `InvalidCorrelationMatrix`: Correlation input that cannot be factorised
/// - `NumericDegenerate`: A zero denominator that has no sentinel in context
/// - `NonConvergence`: An iterative method exhausted its budget
///
/// # Examples
/// ```
/// use quant_core::types::QuantError;
///
/// let err = QuantError::invalid("current_price", "must be positive, got -1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'current_price': must be positive, got -1"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantError {
    /// Non-positive price/volatility/horizon, out-of-range weights and similar.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What was wrong with the value
        reason: String,
    },

    /// Correlation matrix is asymmetric, wrongly sized or not positive definite.
    #[error("Invalid correlation matrix: {0}")]
    InvalidCorrelationMatrix(#[from] CorrelationError),

    /// Zero denominator with no defined sentinel.
    #[error("Numerically degenerate: {0}")]
    NumericDegenerate(String),

    /// Iteration budget exhausted.
    #[error("Failed to converge after {iterations} iterations (best estimate {estimate})")]
    NonConvergence {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate
        estimate: f64,
    },
}

impl QuantError {
    /// Shorthand for [`QuantError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        QuantError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Correlation matrix errors.
///
/// # Examples
/// ```
/// use quant_core::types::CorrelationError;
///
/// let err = CorrelationError::NotSymmetric { i: 0, j: 1 };
/// assert_eq!(format!("{}", err), "Matrix is not symmetric at (0, 1)");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorrelationError {
    /// A Cholesky pivot was zero or negative.
    #[error("Matrix is not positive definite: pivot {pivot} at row {index}")]
    NotPositiveDefinite {
        /// Row at which the decomposition failed
        index: usize,
        /// The non-positive pivot value
        pivot: f64,
    },

    /// Matrix is not square or does not match the asset count.
    #[error("Invalid matrix dimensions: expected {expected}, got {got}")]
    InvalidDimensions {
        /// Expected size
        expected: usize,
        /// Actual size
        got: usize,
    },

    /// Diagonal element differs from 1.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index
        index: usize,
        /// Offending value
        value: f64,
    },

    /// `C[i][j] != C[j][i]`.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
    },

    /// Off-diagonal element outside [-1, 1] or not finite.
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index
        i: usize,
        /// Column index
        j: usize,
        /// Offending value
        value: f64,
    },
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use quant_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100, last: 0.3 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
        /// Last iterate
        last: f64,
    },

    /// `f(a)` and `f(b)` share a sign, so `[a, b]` does not bracket a root.
    #[error("No sign change on [{a}, {b}]")]
    NoBracket {
        /// Left end
        a: f64,
        /// Right end
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for QuantError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded { iterations, last } => QuantError::NonConvergence {
                iterations,
                estimate: last,
            },
            SolverError::NoBracket { .. } | SolverError::NumericalInstability(_) => {
                QuantError::NumericDegenerate(err.to_string())
            }
        }
    }
}
