//! Black-Scholes pricing with continuous dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Units
//!
//! Greeks are reported in desk units: theta per calendar day (÷365), vega
//! per one volatility point and rho per one rate point (÷100).

use quant_core::math::distributions::{norm_cdf, norm_pdf};
use quant_core::QuantResult;

use crate::instruments::{OptionParameters, OptionType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Calendar days used to express theta per day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scale from a unit move to a one-percentage-point move.
const PERCENT: f64 = 100.0;

/// Call and put premiums for the same parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionPrices {
    /// Call premium
    pub call: f64,
    /// Put premium
    pub put: f64,
}

/// Option Greeks in desk units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Greeks {
    /// Delta: ∂V/∂S
    pub delta: f64,
    /// Gamma: ∂²V/∂S²
    pub gamma: f64,
    /// Theta: ∂V/∂t per calendar day
    pub theta: f64,
    /// Vega: ∂V/∂σ per 1% volatility
    pub vega: f64,
    /// Rho: ∂V/∂r per 1% rate
    pub rho: f64,
}

/// Black-Scholes model bound to one set of [`OptionParameters`].
///
/// # Examples
/// ```
/// use quant_models::analytical::BlackScholes;
/// use quant_models::instruments::OptionParameters;
///
/// let params = OptionParameters::new(100.0, 100.0, 1.0, 0.05, 0.2);
/// let bs = BlackScholes::new(params).unwrap();
/// let prices = bs.price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = prices.call - prices.put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes {
    params: OptionParameters,
}

impl BlackScholes {
    /// Validates `params` and binds the model to them.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` from [`OptionParameters::validate`].
    pub fn new(params: OptionParameters) -> QuantResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Skips validation; callers guarantee `params` already passed it.
    #[inline]
    pub(crate) fn trusted(params: OptionParameters) -> Self {
        Self { params }
    }

    /// Returns the bound parameters.
    #[inline]
    pub fn params(&self) -> &OptionParameters {
        &self.params
    }

    #[inline]
    fn expiry(&self) -> f64 {
        self.params.time_to_expiry.max(0.0)
    }

    #[inline]
    fn vol_sqrt_t(&self) -> f64 {
        self.params.volatility * self.expiry().sqrt()
    }

    /// `(e^(-qT), e^(-rT))`, with T floored at zero.
    #[inline]
    fn discount_factors(&self) -> (f64, f64) {
        let t = self.expiry();
        (
            (-self.params.dividend_yield * t).exp(),
            (-self.params.risk_free_rate * t).exp(),
        )
    }

    /// `true` when σ√T is zero and the lognormal density collapses.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.params.is_expired() || self.vol_sqrt_t() <= 0.0
    }

    /// Computes d₁, or `None` when [`is_degenerate`](Self::is_degenerate).
    pub fn d1(&self) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        let p = &self.params;
        let t = self.expiry();
        let drift = p.risk_free_rate - p.dividend_yield + 0.5 * p.volatility * p.volatility;
        Some(((p.spot / p.strike).ln() + drift * t) / self.vol_sqrt_t())
    }

    /// Computes d₂ = d₁ - σ√T, or `None` when degenerate.
    pub fn d2(&self) -> Option<f64> {
        self.d1().map(|d1| d1 - self.vol_sqrt_t())
    }

    /// `S·e^(-qT) - K·e^(-rT)`.
    #[inline]
    fn forward_moneyness(&self) -> f64 {
        let (df_q, df_r) = self.discount_factors();
        self.params.spot * df_q - self.params.strike * df_r
    }

    /// Call premium, floored at zero.
    pub fn price_call(&self) -> f64 {
        let p = &self.params;
        let value = match (self.d1(), self.d2()) {
            (Some(d1), Some(d2)) => {
                let (df_q, df_r) = self.discount_factors();
                p.spot * df_q * norm_cdf(d1) - p.strike * df_r * norm_cdf(d2)
            }
            _ => self.forward_moneyness(),
        };
        value.max(0.0)
    }

    /// Put premium, floored at zero.
    pub fn price_put(&self) -> f64 {
        let p = &self.params;
        let value = match (self.d1(), self.d2()) {
            (Some(d1), Some(d2)) => {
                let (df_q, df_r) = self.discount_factors();
                p.strike * df_r * norm_cdf(-d2) - p.spot * df_q * norm_cdf(-d1)
            }
            _ => -self.forward_moneyness(),
        };
        value.max(0.0)
    }

    /// Premium for one side.
    #[inline]
    pub fn price_of(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.price_call(),
            OptionType::Put => self.price_put(),
        }
    }

    /// Call and put premiums together.
    pub fn price(&self) -> OptionPrices {
        OptionPrices {
            call: self.price_call(),
            put: self.price_put(),
        }
    }

    /// Delta.
    ///
    /// When degenerate, the call delta is `e^(-qT)` in the money, zero out of
    /// the money and half of that at the money; put delta is call delta
    /// minus `e^(-qT)`.
    pub fn delta(&self, option_type: OptionType) -> f64 {
        let (df_q, _) = self.discount_factors();
        let call_delta = match self.d1() {
            Some(d1) => df_q * norm_cdf(d1),
            None => {
                let moneyness = self.forward_moneyness();
                if moneyness > 0.0 {
                    df_q
                } else if moneyness < 0.0 {
                    0.0
                } else {
                    0.5 * df_q
                }
            }
        };
        match option_type {
            OptionType::Call => call_delta,
            OptionType::Put => call_delta - df_q,
        }
    }

    /// Gamma, identical for calls and puts.
    pub fn gamma(&self) -> f64 {
        match self.d1() {
            Some(d1) => {
                let (df_q, _) = self.discount_factors();
                df_q * norm_pdf(d1) / (self.params.spot * self.vol_sqrt_t())
            }
            None => 0.0,
        }
    }

    /// ∂V/∂σ per unit of volatility (not scaled to 1%).
    ///
    /// This is the derivative Newton-Raphson needs when backing out implied
    /// volatility.
    pub fn vol_sensitivity(&self) -> f64 {
        match self.d1() {
            Some(d1) => {
                let (df_q, _) = self.discount_factors();
                self.params.spot * df_q * norm_pdf(d1) * self.expiry().sqrt()
            }
            None => 0.0,
        }
    }

    /// Vega per 1% volatility.
    #[inline]
    pub fn vega(&self) -> f64 {
        self.vol_sensitivity() / PERCENT
    }

    /// Theta per calendar day.
    pub fn theta(&self, option_type: OptionType) -> f64 {
        let (Some(d1), Some(d2)) = (self.d1(), self.d2()) else {
            return 0.0;
        };
        let p = &self.params;
        let (df_q, df_r) = self.discount_factors();
        let decay = -p.spot * df_q * norm_pdf(d1) * p.volatility / (2.0 * self.expiry().sqrt());
        let annual = match option_type {
            OptionType::Call => {
                decay - p.risk_free_rate * p.strike * df_r * norm_cdf(d2)
                    + p.dividend_yield * p.spot * df_q * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + p.risk_free_rate * p.strike * df_r * norm_cdf(-d2)
                    - p.dividend_yield * p.spot * df_q * norm_cdf(-d1)
            }
        };
        annual / DAYS_PER_YEAR
    }

    /// Rho per 1% rate.
    pub fn rho(&self, option_type: OptionType) -> f64 {
        let Some(d2) = self.d2() else {
            return 0.0;
        };
        let (_, df_r) = self.discount_factors();
        let scale = self.params.strike * self.expiry() * df_r;
        let annual = match option_type {
            OptionType::Call => scale * norm_cdf(d2),
            OptionType::Put => -scale * norm_cdf(-d2),
        };
        annual / PERCENT
    }

    /// All Greeks for one side.
    pub fn greeks(&self, option_type: OptionType) -> Greeks {
        Greeks {
            delta: self.delta(option_type),
            gamma: self.gamma(),
            theta: self.theta(option_type),
            vega: self.vega(),
            rho: self.rho(option_type),
        }
    }
}
