//! Error types for simulation setup.
//!
//! Numeric field checks go straight to [`QuantError`]; the variants here
//! cover shape and sizing problems specific to the simulators.

use quant_core::types::{CorrelationError, QuantError};
use thiserror::Error;

use super::config::{MAX_HORIZON_DAYS, MAX_PATHS};

/// Simulation configuration error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// Path count outside `[1, MAX_PATHS]`.
    #[error("Invalid path count {0}: must be in range [1, {max}]", max = MAX_PATHS)]
    InvalidPathCount(usize),

    /// Horizon outside `[1, MAX_HORIZON_DAYS]`.
    #[error("Invalid time horizon {0} days: must be in range [1, {max}]", max = MAX_HORIZON_DAYS)]
    InvalidHorizon(usize),

    /// Rayon batch size of zero.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// A portfolio with no assets.
    #[error("Portfolio has no assets")]
    EmptyPortfolio,

    /// Every weight is zero, so the portfolio starts at zero value.
    #[error("Portfolio has zero initial value: at least one weight must be positive")]
    ZeroInitialValue,

    /// Correlation matrix size differs from the asset count.
    #[error("Correlation matrix is {matrix}x{matrix} but portfolio has {assets} assets")]
    DimensionMismatch {
        /// Number of assets
        assets: usize,
        /// Correlation matrix dimension
        matrix: usize,
    },
}

impl From<SimulationError> for QuantError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::InvalidPathCount(_) => QuantError::invalid("num_paths", err.to_string()),
            SimulationError::InvalidHorizon(_) => {
                QuantError::invalid("time_horizon_days", err.to_string())
            }
            SimulationError::InvalidBatchSize(_) => QuantError::invalid("batch_size", err.to_string()),
            SimulationError::EmptyPortfolio => QuantError::invalid("assets", err.to_string()),
            SimulationError::ZeroInitialValue => QuantError::invalid("weight", err.to_string()),
            SimulationError::DimensionMismatch { assets, matrix } => {
                QuantError::InvalidCorrelationMatrix(CorrelationError::InvalidDimensions {
                    expected: assets,
                    got: matrix,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = SimulationError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = SimulationError::DimensionMismatch { assets: 3, matrix: 2 };
        assert_eq!(err.to_string(), "Correlation matrix is 2x2 but portfolio has 3 assets");
    }

    #[test]
    fn test_dimension_mismatch_is_correlation_error() {
        let err: QuantError = SimulationError::DimensionMismatch { assets: 3, matrix: 2 }.into();
        assert!(matches!(
            err,
            QuantError::InvalidCorrelationMatrix(CorrelationError::InvalidDimensions {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_counts_map_to_named_parameters() {
        match QuantError::from(SimulationError::InvalidHorizon(0)) {
            QuantError::InvalidParameter { name, .. } => assert_eq!(name, "time_horizon_days"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }
}
