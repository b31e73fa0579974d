//! # quant_core: Numerical Foundation for the Calculation Core
//!
//! ## Layer 1 (Foundation) Role
//!
//! quant_core is the bottom layer of the workspace and provides:
//! - The error taxonomy shared by every layer (`types::error`)
//! - Parameter validation helpers (`types::validation`)
//! - Standard normal CDF/PDF (`math::distributions`)
//! - Correlation matrices and their Cholesky factors (`math::correlation`)
//! - A bounded Newton-Raphson root finder (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other quant_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use quant_core::math::correlation::CorrelationMatrix;
//! use quant_core::math::distributions::norm_cdf;
//!
//! let corr = CorrelationMatrix::from_rows(&[vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
//! let chol = corr.cholesky().unwrap();
//! assert!((chol.get(1, 1) - 0.75_f64.sqrt()).abs() < 1e-12);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for correlation matrices and correlation errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

pub use types::{QuantError, QuantResult};
