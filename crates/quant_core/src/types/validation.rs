//! Fail-fast parameter checks.
//!
//! Every public entry point validates its numeric inputs with these helpers
//! before doing any work, so an invalid request never yields a partial result.

use super::error::{QuantError, QuantResult};

/// Requires `value` to be finite.
#[inline]
pub fn ensure_finite(name: &'static str, value: f64) -> QuantResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuantError::invalid(name, format!("must be finite, got {}", value)))
    }
}

/// Requires `value > 0` and finite.
#[inline]
pub fn ensure_positive(name: &'static str, value: f64) -> QuantResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(QuantError::invalid(name, format!("must be positive, got {}", value)))
    }
}

/// Requires `value >= 0` and finite.
#[inline]
pub fn ensure_non_negative(name: &'static str, value: f64) -> QuantResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(QuantError::invalid(
            name,
            format!("must be non-negative, got {}", value),
        ))
    }
}

/// Requires `lower <= value <= upper`.
#[inline]
pub fn ensure_in_range(name: &'static str, value: f64, lower: f64, upper: f64) -> QuantResult<f64> {
    if value.is_finite() && value >= lower && value <= upper {
        Ok(value)
    } else {
        Err(QuantError::invalid(
            name,
            format!("must be in [{}, {}], got {}", lower, upper, value),
        ))
    }
}

/// Requires a count to be at least one.
#[inline]
pub fn ensure_non_zero(name: &'static str, value: usize) -> QuantResult<usize> {
    if value > 0 {
        Ok(value)
    } else {
        Err(QuantError::invalid(name, "must be at least 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("spot", 100.0), Ok(100.0));
        assert!(ensure_positive("spot", 0.0).is_err());
        assert!(ensure_positive("spot", -1.0).is_err());
        assert!(ensure_positive("spot", f64::NAN).is_err());
        assert!(ensure_positive("spot", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("volatility", 0.0), Ok(0.0));
        assert!(ensure_non_negative("volatility", -1e-12).is_err());
    }

    #[test]
    fn test_ensure_in_range_bounds_inclusive() {
        assert!(ensure_in_range("weight", 0.0, 0.0, 1.0).is_ok());
        assert!(ensure_in_range("weight", 1.0, 0.0, 1.0).is_ok());
        assert!(ensure_in_range("weight", 1.01, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_error_names_parameter() {
        match ensure_non_zero("num_paths", 0) {
            Err(QuantError::InvalidParameter { name, .. }) => assert_eq!(name, "num_paths"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
        assert!(ensure_finite("expected_return", f64::NEG_INFINITY).is_err());
    }
}
