//! Closed-form analytics for European options.
//!
//! This module provides:
//! - Black-Scholes prices with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho) in desk units
//! - Implied volatility by bounded Newton-Raphson
//!
//! ## Degenerate Inputs
//!
//! At or past expiry, or with zero volatility, prices collapse to the
//! discounted forward intrinsic value and Greeks become step functions.
//! No path produces NaN from finite, validated inputs.

pub mod black_scholes;
pub mod error;
pub mod implied_vol;

pub use black_scholes::{BlackScholes, Greeks, OptionPrices};
pub use error::AnalyticalError;
pub use implied_vol::{implied_volatility, ImpliedVolatility};
