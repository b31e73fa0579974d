//! Mathematical building blocks.
//!
//! - [`distributions`]: Standard normal CDF and PDF
//! - [`correlation`]: Validated correlation matrices and Cholesky factors
//! - [`solvers`]: Bounded Newton-Raphson root finding

pub mod correlation;
pub mod distributions;
pub mod solvers;
