//! Error types for closed-form option analytics.

use quant_core::types::QuantError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Raised by [`implied_volatility`](super::implied_volatility) when the
/// quoted price cannot correspond to any volatility. Converts into
/// [`QuantError`] so callers only ever see the shared taxonomy.
///
/// # Examples
/// ```
/// use quant_models::analytical::AnalyticalError;
/// use quant_core::QuantError;
///
/// let err = AnalyticalError::InvalidMarketPrice { price: -1.0 };
/// assert!(format!("{}", err).contains("market price"));
/// assert!(matches!(
///     QuantError::from(err),
///     QuantError::InvalidParameter { name: "market_price", .. }
/// ));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Quoted premium is zero, negative or not finite.
    #[error("Invalid market price: {price}")]
    InvalidMarketPrice {
        /// The rejected premium
        price: f64,
    },

    /// Implied volatility needs time value left on the option.
    #[error("Option has expired: T = {time_to_expiry}")]
    Expired {
        /// Time to expiry in years
        time_to_expiry: f64,
    },

    /// Premium at or above the model's no-arbitrage ceiling.
    #[error("Market price {price} is not below the arbitrage bound {bound}")]
    AboveArbitrageBound {
        /// The rejected premium
        price: f64,
        /// `S·e^(-qT)` for calls, `K·e^(-rT)` for puts
        bound: f64,
    },
}

impl From<AnalyticalError> for QuantError {
    fn from(err: AnalyticalError) -> Self {
        let name = match err {
            AnalyticalError::InvalidMarketPrice { .. }
            | AnalyticalError::AboveArbitrageBound { .. } => "market_price",
            AnalyticalError::Expired { .. } => "time_to_expiry",
        };
        QuantError::invalid(name, err.to_string())
    }
}
