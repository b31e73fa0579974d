//! Error and validation types shared across the workspace.
//!
//! This module provides:
//! - `error`: The [`QuantError`] taxonomy plus layer-specific errors for
//!   correlation matrices and solvers
//! - `validation`: Fail-fast checks used by every public entry point
//!
//! # Re-exports
//!
//! - [`QuantError`], [`QuantResult`], [`CorrelationError`], [`SolverError`] from `error`

pub mod error;
pub mod validation;

pub use error::{CorrelationError, QuantError, QuantResult, SolverError};
