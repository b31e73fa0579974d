//! Heuristic portfolio weights.
//!
//! These are deliberately simple placeholders: equal weighting and inverse
//! volatility ("naive risk parity"). Neither solves a constrained
//! mean-variance problem, and no covariance information is used.

use quant_core::types::validation::ensure_positive;
use quant_core::{QuantError, QuantResult};
use quant_sim::mc::PortfolioAsset;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weighting rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AllocationMethod {
    /// `1 / n` each.
    #[default]
    EqualWeight,
    /// `(1 / σᵢ) / Σ (1 / σⱼ)`.
    InverseVolatility,
}

/// Weights for assets with the given annualised volatilities.
///
/// # Errors
/// `QuantError::InvalidParameter` for an empty list, or a non-positive
/// volatility under [`AllocationMethod::InverseVolatility`].
///
/// # Examples
/// ```
/// use quant_analytics::allocation::{weights, AllocationMethod};
///
/// let w = weights(AllocationMethod::InverseVolatility, &[0.1, 0.2]).unwrap();
/// assert!((w[0] - 2.0 / 3.0).abs() < 1e-12);
/// assert!((w[1] - 1.0 / 3.0).abs() < 1e-12);
/// ```
pub fn weights(method: AllocationMethod, volatilities: &[f64]) -> QuantResult<Vec<f64>> {
    if volatilities.is_empty() {
        return Err(QuantError::invalid("volatilities", "must not be empty"));
    }
    match method {
        AllocationMethod::EqualWeight => {
            let w = 1.0 / volatilities.len() as f64;
            Ok(vec![w; volatilities.len()])
        }
        AllocationMethod::InverseVolatility => {
            let inverse = volatilities
                .iter()
                .map(|&vol| ensure_positive("volatility", vol).map(|v| 1.0 / v))
                .collect::<QuantResult<Vec<f64>>>()?;
            let total: f64 = inverse.iter().sum();
            Ok(inverse.into_iter().map(|x| x / total).collect())
        }
    }
}

/// Returns `assets` with weights replaced according to `method`.
///
/// # Errors
/// As [`weights`].
pub fn rebalance(assets: &[PortfolioAsset], method: AllocationMethod) -> QuantResult<Vec<PortfolioAsset>> {
    let vols: Vec<f64> = assets.iter().map(|a| a.volatility).collect();
    let w = weights(method, &vols)?;
    Ok(assets
        .iter()
        .zip(w)
        .map(|(asset, weight)| PortfolioAsset {
            weight,
            ..asset.clone()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_equal_weight() {
        let w = weights(AllocationMethod::EqualWeight, &[0.1, 0.0, 0.5, 0.3]).unwrap();
        assert_eq!(w, vec![0.25; 4]);
    }

    #[test]
    fn test_inverse_volatility_sums_to_one() {
        let w = weights(AllocationMethod::InverseVolatility, &[0.1, 0.25, 0.4]).unwrap();
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert!(w[0] > w[1] && w[1] > w[2]);
    }

    #[test]
    fn test_inverse_volatility_rejects_zero_vol() {
        assert!(weights(AllocationMethod::InverseVolatility, &[0.1, 0.0]).is_err());
        assert!(weights(AllocationMethod::EqualWeight, &[]).is_err());
    }

    #[test]
    fn test_rebalance_keeps_other_fields() {
        let assets = vec![
            PortfolioAsset::new("AAA", 0.9, 100.0, 0.08, 0.2),
            PortfolioAsset::new("BBB", 0.1, 50.0, 0.05, 0.2),
        ];
        let rebalanced = rebalance(&assets, AllocationMethod::InverseVolatility).unwrap();
        assert_eq!(rebalanced[0].weight, 0.5);
        assert_eq!(rebalanced[1].ticker, "BBB");
        assert_eq!(rebalanced[1].current_price, 50.0);
    }
}
