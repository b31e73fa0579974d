//! European option inputs.

use quant_core::types::validation::{ensure_finite, ensure_non_negative, ensure_positive};
use quant_core::QuantResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Option right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Intrinsic value at `spot`.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// Market and contract inputs for a European option.
///
/// Rates, yields and volatility are annualised and continuously compounded.
/// A non-positive `time_to_expiry` means the option has expired and is
/// priced at intrinsic value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptionParameters {
    /// Underlying price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Risk-free rate (r)
    pub risk_free_rate: f64,
    /// Volatility (σ)
    pub volatility: f64,
    /// Continuous dividend yield (q)
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: f64,
}

impl OptionParameters {
    /// Creates parameters with zero dividend yield.
    ///
    /// No validation happens here; pricers call [`validate`](Self::validate).
    pub fn new(spot: f64, strike: f64, time_to_expiry: f64, risk_free_rate: f64, volatility: f64) -> Self {
        Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            dividend_yield: 0.0,
        }
    }

    /// Sets the dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets the volatility, keeping everything else.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Checks every field.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` if spot or strike is not positive,
    /// volatility or dividend yield is negative, or any field is not finite.
    pub fn validate(&self) -> QuantResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_finite("time_to_expiry", self.time_to_expiry)?;
        ensure_finite("risk_free_rate", self.risk_free_rate)?;
        ensure_non_negative("volatility", self.volatility)?;
        ensure_non_negative("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    /// `true` when no time value remains.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.time_to_expiry <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_core::QuantError;

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(120.0, 100.0), 20.0);
        assert_eq!(OptionType::Call.intrinsic(80.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(80.0, 100.0), 20.0);
        assert_eq!(OptionType::Put.intrinsic(120.0, 100.0), 0.0);
    }

    #[test]
    fn test_validate_accepts_expired_and_zero_vol() {
        assert!(OptionParameters::new(100.0, 100.0, 0.0, 0.05, 0.0).validate().is_ok());
        assert!(OptionParameters::new(100.0, 100.0, -0.1, 0.05, 0.2).validate().is_ok());
        assert!(OptionParameters::new(100.0, 100.0, -0.1, 0.05, 0.2).is_expired());
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let base = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2);
        let cases = [
            (OptionParameters { spot: 0.0, ..base }, "spot"),
            (OptionParameters { strike: -5.0, ..base }, "strike"),
            (OptionParameters { time_to_expiry: f64::NAN, ..base }, "time_to_expiry"),
            (OptionParameters { risk_free_rate: f64::INFINITY, ..base }, "risk_free_rate"),
            (OptionParameters { volatility: -0.2, ..base }, "volatility"),
            (base.with_dividend_yield(-0.01), "dividend_yield"),
        ];
        for (params, expected) in cases {
            match params.validate() {
                Err(QuantError::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("Expected InvalidParameter for {}, got {:?}", expected, other),
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_field_names() {
        let json = r#"{"spot":100,"strike":95,"timeToExpiry":0.5,"riskFreeRate":0.03,"volatility":0.25}"#;
        let params: OptionParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.strike, 95.0);
        assert_eq!(params.dividend_yield, 0.0);

        let ty: OptionType = serde_json::from_str("\"put\"").unwrap();
        assert_eq!(ty, OptionType::Put);
    }
}
