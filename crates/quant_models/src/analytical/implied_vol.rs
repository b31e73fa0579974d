//! Implied volatility by bounded Newton-Raphson, with a Brent fallback.

use quant_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use quant_core::types::SolverError;
use quant_core::{QuantError, QuantResult};

use super::black_scholes::BlackScholes;
use super::error::AnalyticalError;
use crate::instruments::{OptionParameters, OptionType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Starting volatility for the search.
pub const INITIAL_GUESS: f64 = 0.2;
/// Lower clamp applied to every iterate.
pub const MIN_VOLATILITY: f64 = 0.001;
/// Upper clamp applied to every iterate.
pub const MAX_VOLATILITY: f64 = 5.0;
/// Stop once `|model - market| < PRICE_TOLERANCE`.
pub const PRICE_TOLERANCE: f64 = 1e-4;
/// Newton update budget.
pub const MAX_ITERATIONS: usize = 100;

/// Residual and bracket width at which the fallback search stops.
const BRACKET_TOLERANCE: f64 = 1e-10;

/// Outcome of an implied volatility search.
///
/// `volatility` is always the best estimate found. Check `converged` before
/// trusting it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpliedVolatility {
    /// Best volatility estimate, within `[MIN_VOLATILITY, MAX_VOLATILITY]`
    pub volatility: f64,
    /// `true` iff the model price is within tolerance of the market price
    pub converged: bool,
    /// Updates performed by the solver that produced `volatility`
    pub iterations: usize,
    /// Model price at `volatility` minus the market price
    pub price_error: f64,
}

impl ImpliedVolatility {
    /// The volatility, or an error if the search did not converge.
    ///
    /// # Errors
    /// `QuantError::NonConvergence` carrying the best estimate.
    pub fn require_converged(self) -> QuantResult<f64> {
        if self.converged {
            Ok(self.volatility)
        } else {
            Err(QuantError::NonConvergence {
                iterations: self.iterations,
                estimate: self.volatility,
            })
        }
    }
}

/// Backs out the Black-Scholes volatility that reproduces `market_price`.
///
/// The `volatility` field of `params` is ignored. Iterates
/// `σ ← σ - (price(σ) - market) / vega(σ)` from σ = 0.2, clamping each step
/// to `[0.001, 5]`.
///
/// Away from the money the first Newton step can overshoot onto a clamp
/// where vega vanishes. When Newton stops without converging, Brent's method
/// searches `[0.001, 5]` instead; the price is increasing in σ there, so any
/// reachable price is bracketed. A price outside that range keeps the Newton
/// estimate, flagged with `converged = false`.
///
/// # Errors
/// - `QuantError::InvalidParameter` if `params` is invalid, the option has
///   expired, or `market_price` is non-positive, non-finite or at or above
///   the no-arbitrage ceiling
/// - `QuantError::NumericDegenerate` if pricing produces a non-finite value
///
/// # Examples
/// ```
/// use quant_models::analytical::{implied_volatility, BlackScholes};
/// use quant_models::instruments::{OptionParameters, OptionType};
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.3);
/// let market = BlackScholes::new(params).unwrap().price_call();
///
/// let iv = implied_volatility(market, &params, OptionType::Call).unwrap();
/// assert!(iv.converged);
/// assert!((iv.volatility - 0.3).abs() < 1e-3);
/// ```
pub fn implied_volatility(
    market_price: f64,
    params: &OptionParameters,
    option_type: OptionType,
) -> QuantResult<ImpliedVolatility> {
    let params = params.with_volatility(INITIAL_GUESS);
    params.validate()?;

    if !market_price.is_finite() || market_price <= 0.0 {
        return Err(AnalyticalError::InvalidMarketPrice {
            price: market_price,
        }
        .into());
    }
    if params.is_expired() {
        return Err(AnalyticalError::Expired {
            time_to_expiry: params.time_to_expiry,
        }
        .into());
    }

    let t = params.time_to_expiry;
    let bound = match option_type {
        OptionType::Call => params.spot * (-params.dividend_yield * t).exp(),
        OptionType::Put => params.strike * (-params.risk_free_rate * t).exp(),
    };
    if market_price >= bound {
        return Err(AnalyticalError::AboveArbitrageBound {
            price: market_price,
            bound,
        }
        .into());
    }

    let model = |sigma: f64| BlackScholes::trusted(params.with_volatility(sigma));
    let price_gap = |sigma: f64| model(sigma).price_of(option_type) - market_price;
    let config = SolverConfig::new(PRICE_TOLERANCE, MAX_ITERATIONS);

    let newton = NewtonRaphsonSolver::new(config).find_root_bounded(
        price_gap,
        |sigma| model(sigma).vol_sensitivity(),
        INITIAL_GUESS,
        MIN_VOLATILITY,
        MAX_VOLATILITY,
    )?;
    let newton_estimate = ImpliedVolatility {
        volatility: newton.root,
        converged: newton.converged,
        iterations: newton.iterations,
        price_error: newton.residual,
    };
    if newton.converged {
        return Ok(newton_estimate);
    }

    tracing::debug!(
        market_price,
        volatility = newton.root,
        termination = ?newton.termination,
        "Newton stalled, bracketing implied volatility"
    );
    let estimate = match BrentSolver::new(config.with_tolerance(BRACKET_TOLERANCE)).find_root(
        price_gap,
        MIN_VOLATILITY,
        MAX_VOLATILITY,
    ) {
        Ok(outcome) => ImpliedVolatility {
            volatility: outcome.root,
            converged: outcome.residual.abs() < PRICE_TOLERANCE,
            iterations: outcome.iterations,
            price_error: outcome.residual,
        },
        Err(SolverError::NoBracket { .. }) | Err(SolverError::MaxIterationsExceeded { .. }) => {
            newton_estimate
        }
        Err(err) => return Err(err.into()),
    };

    if !estimate.converged {
        tracing::warn!(
            market_price,
            volatility = estimate.volatility,
            iterations = estimate.iterations,
            price_error = estimate.price_error,
            "implied volatility did not converge"
        );
    }
    Ok(estimate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> OptionParameters {
        OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2)
    }

    #[test]
    fn test_round_trip_across_volatilities() {
        for sigma in [0.05, 0.1, 0.2, 0.35, 0.5, 0.75, 1.0] {
            let params = base().with_volatility(sigma);
            let bs = BlackScholes::new(params).unwrap();
            for ty in [OptionType::Call, OptionType::Put] {
                let iv = implied_volatility(bs.price_of(ty), &params, ty).unwrap();
                assert!(iv.converged, "sigma = {}, {:?}", sigma, ty);
                assert_relative_eq!(iv.volatility, sigma, epsilon = 1e-3);
                assert!(iv.price_error.abs() < PRICE_TOLERANCE);
            }
        }
    }

    #[test]
    fn test_round_trip_away_from_the_money() {
        // Newton from 0.2 overshoots onto the lower clamp for these strikes
        for strike in [60.0, 80.0] {
            for t in [0.5, 2.0] {
                for sigma in [0.6, 1.5] {
                    for q in [0.0, 0.03] {
                        let params = OptionParameters::new(100.0, strike, t, 0.05, sigma)
                            .with_dividend_yield(q);
                        let bs = BlackScholes::new(params).unwrap();
                        for ty in [OptionType::Call, OptionType::Put] {
                            let iv = implied_volatility(bs.price_of(ty), &params, ty).unwrap();
                            assert!(iv.converged, "K = {}, T = {}, sigma = {}, {:?}", strike, t, sigma, ty);
                            assert_relative_eq!(iv.volatility, sigma, epsilon = 1e-3);
                            assert!(iv.price_error.abs() < PRICE_TOLERANCE);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_deep_in_the_money_call_needs_fallback() {
        let params = OptionParameters::new(100.0, 60.0, 0.5, 0.05, 0.6);
        let market = BlackScholes::new(params).unwrap().price_call();
        let iv = implied_volatility(market, &params, OptionType::Call).unwrap();
        assert!(iv.converged);
        assert_relative_eq!(iv.volatility, 0.6, epsilon = 1e-6);
        assert!(iv.iterations > 0);
    }

    #[test]
    fn test_round_trip_with_dividend() {
        let params = OptionParameters::new(100.0, 95.0, 0.5, 0.03, 0.25).with_dividend_yield(0.02);
        let market = BlackScholes::new(params).unwrap().price_put();
        let iv = implied_volatility(market, &params, OptionType::Put).unwrap();
        assert!(iv.converged);
        assert_relative_eq!(iv.volatility, 0.25, epsilon = 1e-3);
    }

    #[test]
    fn test_input_volatility_is_ignored() {
        let market = BlackScholes::new(base()).unwrap().price_call();
        let params = base().with_volatility(-3.0);
        let iv = implied_volatility(market, &params, OptionType::Call).unwrap();
        assert_relative_eq!(iv.volatility, 0.2, epsilon = 1e-3);
    }

    #[test]
    fn test_price_below_attainable_is_flagged_not_failed() {
        // Forward intrinsic is ~4.88, so no volatility reproduces 1.0
        let iv = implied_volatility(1.0, &base(), OptionType::Call).unwrap();
        assert!(!iv.converged);
        assert_relative_eq!(iv.volatility, MIN_VOLATILITY, epsilon = 1e-12);
        assert!(iv.price_error > 0.0);
        assert!(matches!(
            iv.require_converged(),
            Err(QuantError::NonConvergence { .. })
        ));
    }

    #[test]
    fn test_invalid_market_prices_rejected() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                implied_volatility(price, &base(), OptionType::Call),
                Err(QuantError::InvalidParameter { name: "market_price", .. })
            ));
        }
    }

    #[test]
    fn test_price_above_arbitrage_bound_rejected() {
        assert!(matches!(
            implied_volatility(100.0, &base(), OptionType::Call),
            Err(QuantError::InvalidParameter { name: "market_price", .. })
        ));
        assert!(implied_volatility(96.0, &base(), OptionType::Put).is_err());
    }

    #[test]
    fn test_expired_option_rejected() {
        let params = OptionParameters { time_to_expiry: 0.0, ..base() };
        assert!(matches!(
            implied_volatility(5.0, &params, OptionType::Call),
            Err(QuantError::InvalidParameter { name: "time_to_expiry", .. })
        ));
    }
}
