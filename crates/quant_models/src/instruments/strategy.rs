//! Multi-leg option strategies and their expiry payoff diagrams.
//!
//! Each leg contributes `(intrinsic - premium) · quantity` when bought and
//! `(premium - intrinsic) · quantity` when sold. A strategy's payoff is the
//! plain sum over legs; no cross-leg consistency is enforced.

use quant_core::types::validation::{ensure_finite, ensure_non_negative, ensure_positive};
use quant_core::{QuantError, QuantResult};

use super::OptionType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LegAction {
    /// Long the option, premium paid.
    Buy,
    /// Short the option, premium received.
    Sell,
}

impl LegAction {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            LegAction::Buy => 1.0,
            LegAction::Sell => -1.0,
        }
    }
}

/// One option position within a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionLeg {
    /// Call or put
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub option_type: OptionType,
    /// Buy or sell
    pub action: LegAction,
    /// Strike price
    pub strike: f64,
    /// Number of contracts
    pub quantity: f64,
    /// Premium per contract
    pub premium: f64,
}

impl OptionLeg {
    /// Long leg.
    pub fn buy(option_type: OptionType, strike: f64, quantity: f64, premium: f64) -> Self {
        Self {
            option_type,
            action: LegAction::Buy,
            strike,
            quantity,
            premium,
        }
    }

    /// Short leg.
    pub fn sell(option_type: OptionType, strike: f64, quantity: f64, premium: f64) -> Self {
        Self {
            action: LegAction::Sell,
            ..Self::buy(option_type, strike, quantity, premium)
        }
    }

    fn validate(&self) -> QuantResult<()> {
        ensure_positive("strike", self.strike)?;
        ensure_positive("quantity", self.quantity)?;
        ensure_finite("premium", self.premium)?;
        Ok(())
    }

    /// Profit or loss of this leg if the underlying settles at `spot`.
    #[inline]
    pub fn payoff_at(&self, spot: f64) -> f64 {
        let intrinsic = self.option_type.intrinsic(spot, self.strike);
        self.action.sign() * (intrinsic - self.premium) * self.quantity
    }
}

/// Payoff of a strategy at one settlement price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PayoffPoint {
    /// Underlying price at expiry
    pub spot: f64,
    /// Net profit or loss
    pub payoff: f64,
}

/// Summary of a payoff diagram over a spot grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StrategyProfile {
    /// Payoff at each grid point
    pub points: Vec<PayoffPoint>,
    /// Spots where the payoff crosses zero, interpolated between grid points.
    /// A stretch of grid points paying exactly zero contributes its two ends.
    pub breakevens: Vec<f64>,
    /// Largest payoff on the grid
    pub max_profit: f64,
    /// Smallest payoff on the grid
    pub max_loss: f64,
}

/// Ordered collection of option legs.
///
/// # Examples
/// ```
/// use quant_models::instruments::{OptionLeg, OptionStrategy, OptionType};
///
/// let strategy = OptionStrategy::new(vec![OptionLeg::buy(OptionType::Call, 100.0, 1.0, 5.0)]);
/// let points = strategy.payoff(&[120.0]).unwrap();
/// assert_eq!(points[0].payoff, 15.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OptionStrategy {
    legs: Vec<OptionLeg>,
}

impl OptionStrategy {
    /// Wraps a list of legs.
    pub fn new(legs: Vec<OptionLeg>) -> Self {
        Self { legs }
    }

    /// Returns the legs in order.
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Long straddle: buy a call and a put at the same strike.
    pub fn straddle(strike: f64, call_premium: f64, put_premium: f64) -> Self {
        Self::new(vec![
            OptionLeg::buy(OptionType::Call, strike, 1.0, call_premium),
            OptionLeg::buy(OptionType::Put, strike, 1.0, put_premium),
        ])
    }

    /// Bull call spread: buy the lower strike call, sell the upper.
    pub fn bull_call_spread(lower: f64, upper: f64, lower_premium: f64, upper_premium: f64) -> Self {
        Self::new(vec![
            OptionLeg::buy(OptionType::Call, lower, 1.0, lower_premium),
            OptionLeg::sell(OptionType::Call, upper, 1.0, upper_premium),
        ])
    }

    /// Checks every leg.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` if a leg has a non-positive strike or
    /// quantity, or a non-finite premium.
    pub fn validate(&self) -> QuantResult<()> {
        self.legs.iter().try_for_each(OptionLeg::validate)
    }

    /// Net payoff at a single settlement price.
    #[inline]
    pub fn payoff_at(&self, spot: f64) -> f64 {
        self.legs.iter().map(|leg| leg.payoff_at(spot)).sum()
    }

    /// Evaluates the payoff diagram at each spot in order.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for an invalid leg or a negative or
    /// non-finite spot.
    pub fn payoff(&self, spots: &[f64]) -> QuantResult<Vec<PayoffPoint>> {
        self.validate()?;
        spots
            .iter()
            .map(|&spot| {
                ensure_non_negative("spot", spot)?;
                Ok(PayoffPoint {
                    spot,
                    payoff: self.payoff_at(spot),
                })
            })
            .collect()
    }

    /// Payoff diagram plus break-evens and extremes over `spots`.
    ///
    /// # Errors
    /// As [`payoff`](Self::payoff), plus `InvalidParameter` for an empty grid.
    pub fn profile(&self, spots: &[f64]) -> QuantResult<StrategyProfile> {
        if spots.is_empty() {
            return Err(QuantError::invalid("spots", "must not be empty"));
        }
        let points = self.payoff(spots)?;

        let mut breakevens = Vec::new();
        let mut zero_run: Option<f64> = None;
        for (i, point) in points.iter().enumerate() {
            if point.payoff == 0.0 {
                let start = *zero_run.get_or_insert(point.spot);
                if points.get(i + 1).map_or(true, |next| next.payoff != 0.0) {
                    breakevens.push(start);
                    if start != point.spot {
                        breakevens.push(point.spot);
                    }
                    zero_run = None;
                }
                continue;
            }
            if let Some(next) = points.get(i + 1) {
                if point.payoff * next.payoff < 0.0 {
                    let weight = point.payoff / (point.payoff - next.payoff);
                    breakevens.push(point.spot + weight * (next.spot - point.spot));
                }
            }
        }

        let max_profit = points.iter().map(|p| p.payoff).fold(f64::NEG_INFINITY, f64::max);
        let max_loss = points.iter().map(|p| p.payoff).fold(f64::INFINITY, f64::min);

        Ok(StrategyProfile {
            points,
            breakevens,
            max_profit,
            max_loss,
        })
    }
}

/// `num_points` evenly spaced spots from `lower` to `upper` inclusive.
///
/// # Errors
/// `QuantError::InvalidParameter` unless `0 <= lower < upper` and
/// `num_points >= 2`.
pub fn spot_grid(lower: f64, upper: f64, num_points: usize) -> QuantResult<Vec<f64>> {
    ensure_non_negative("lower", lower)?;
    ensure_finite("upper", upper)?;
    if upper <= lower {
        return Err(QuantError::invalid(
            "upper",
            format!("must exceed lower bound {}, got {}", lower, upper),
        ));
    }
    if num_points < 2 {
        return Err(QuantError::invalid("num_points", "must be at least 2"));
    }
    let step = (upper - lower) / (num_points - 1) as f64;
    Ok((0..num_points)
        .map(|i| {
            if i == num_points - 1 {
                upper
            } else {
                lower + step * i as f64
            }
        })
        .collect())
}
