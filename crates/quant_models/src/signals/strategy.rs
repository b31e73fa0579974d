//! Trading strategies as data plus pure evaluation.

use quant_core::types::validation::{ensure_finite, ensure_in_range, ensure_non_negative, ensure_positive};
use quant_core::{QuantError, QuantResult};

use super::indicators::{bollinger_bands, rsi, sma};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trade decision for the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Signal {
    /// Open or add to a long position.
    Buy,
    /// Reduce or short.
    Sell,
    /// Do nothing.
    Hold,
}

/// Signal rule and its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StrategyKind {
    /// Buy when the fast SMA crosses above the slow SMA, sell on the
    /// opposite cross.
    MovingAverageCrossover {
        /// Fast window length
        fast_period: usize,
        /// Slow window length, strictly longer than `fast_period`
        slow_period: usize,
    },
    /// Buy when RSI drops below `oversold`, sell above `overbought`.
    RsiMeanReversion {
        /// RSI lookback
        period: usize,
        /// Lower threshold
        oversold: f64,
        /// Upper threshold
        overbought: f64,
    },
    /// Buy below the lower band, sell above the upper band.
    BollingerBands {
        /// SMA window length
        period: usize,
        /// Band width in standard deviations
        num_std: f64,
    },
}

impl StrategyKind {
    /// Classic 50/200 crossover.
    pub fn golden_cross() -> Self {
        StrategyKind::MovingAverageCrossover {
            fast_period: 50,
            slow_period: 200,
        }
    }

    /// RSI(14) with 30/70 thresholds.
    pub fn rsi_default() -> Self {
        StrategyKind::RsiMeanReversion {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }

    /// Bollinger(20, 2).
    pub fn bollinger_default() -> Self {
        StrategyKind::BollingerBands {
            period: 20,
            num_std: 2.0,
        }
    }

    fn validate(&self) -> QuantResult<()> {
        match *self {
            StrategyKind::MovingAverageCrossover {
                fast_period,
                slow_period,
            } => {
                if fast_period == 0 {
                    return Err(QuantError::invalid("fast_period", "must be at least 1"));
                }
                if fast_period >= slow_period {
                    return Err(QuantError::invalid(
                        "slow_period",
                        format!("must exceed fast period {}, got {}", fast_period, slow_period),
                    ));
                }
            }
            StrategyKind::RsiMeanReversion {
                period,
                oversold,
                overbought,
            } => {
                if period == 0 {
                    return Err(QuantError::invalid("period", "must be at least 1"));
                }
                ensure_in_range("oversold", oversold, 0.0, 100.0)?;
                ensure_in_range("overbought", overbought, 0.0, 100.0)?;
                if oversold >= overbought {
                    return Err(QuantError::invalid(
                        "overbought",
                        format!("must exceed oversold {}, got {}", oversold, overbought),
                    ));
                }
            }
            StrategyKind::BollingerBands { period, num_std } => {
                if period < 2 {
                    return Err(QuantError::invalid("period", "must be at least 2"));
                }
                ensure_positive("num_std", num_std)?;
            }
        }
        Ok(())
    }

    fn evaluate(&self, prices: &[f64]) -> Signal {
        match *self {
            StrategyKind::MovingAverageCrossover {
                fast_period,
                slow_period,
            } => {
                if prices.len() < slow_period + 1 {
                    return Signal::Hold;
                }
                let previous = &prices[..prices.len() - 1];
                let (Some(fast), Some(slow), Some(prev_fast), Some(prev_slow)) = (
                    sma(prices, fast_period),
                    sma(prices, slow_period),
                    sma(previous, fast_period),
                    sma(previous, slow_period),
                ) else {
                    return Signal::Hold;
                };
                if prev_fast <= prev_slow && fast > slow {
                    Signal::Buy
                } else if prev_fast >= prev_slow && fast < slow {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
            StrategyKind::RsiMeanReversion {
                period,
                oversold,
                overbought,
            } => match rsi(prices, period) {
                Some(value) if value < oversold => Signal::Buy,
                Some(value) if value > overbought => Signal::Sell,
                _ => Signal::Hold,
            },
            StrategyKind::BollingerBands { period, num_std } => {
                let (Some(bands), Some(&last)) = (bollinger_bands(prices, period, num_std), prices.last())
                else {
                    return Signal::Hold;
                };
                if last < bands.lower {
                    Signal::Buy
                } else if last > bands.upper {
                    Signal::Sell
                } else {
                    Signal::Hold
                }
            }
        }
    }
}

/// A signal rule plus the share of capital it commits per trade.
///
/// # Examples
/// ```
/// use quant_models::signals::{Signal, StrategyKind, TradingStrategy};
///
/// let strategy = TradingStrategy::new(StrategyKind::rsi_default(), 0.1).unwrap();
/// let falling: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
///
/// let signal = strategy.generate_signal(&falling).unwrap();
/// assert_eq!(signal, Signal::Buy);
/// assert_eq!(strategy.position_size(signal, 10_000.0, 71.0).unwrap(), 14.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradingStrategy {
    /// Signal rule
    pub kind: StrategyKind,
    /// Fraction of capital per trade, in (0, 1]
    pub allocation: f64,
}

impl TradingStrategy {
    /// Validates and builds a strategy.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for zero periods, a fast window not
    /// shorter than the slow one, inverted RSI thresholds, a non-positive
    /// band width, or an allocation outside (0, 1].
    pub fn new(kind: StrategyKind, allocation: f64) -> QuantResult<Self> {
        let strategy = Self { kind, allocation };
        strategy.validate()?;
        Ok(strategy)
    }

    /// Re-checks parameters, for strategies built from deserialised data.
    pub fn validate(&self) -> QuantResult<()> {
        self.kind.validate()?;
        ensure_positive("allocation", self.allocation)?;
        ensure_in_range("allocation", self.allocation, 0.0, 1.0)?;
        Ok(())
    }

    /// Signal for the latest price in `prices` (oldest first).
    ///
    /// Too little history yields [`Signal::Hold`].
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` if any price is not finite.
    pub fn generate_signal(&self, prices: &[f64]) -> QuantResult<Signal> {
        self.validate()?;
        for &price in prices {
            ensure_finite("prices", price)?;
        }
        Ok(self.kind.evaluate(prices))
    }

    /// Whole units to trade on `signal`: positive to buy, negative to sell.
    ///
    /// Sized as `floor(capital · allocation / price)`.
    ///
    /// # Errors
    /// `QuantError::InvalidParameter` for negative capital or non-positive
    /// price.
    pub fn position_size(&self, signal: Signal, capital: f64, price: f64) -> QuantResult<f64> {
        ensure_non_negative("capital", capital)?;
        ensure_positive("price", price)?;
        let units = (capital * self.allocation / price).floor();
        Ok(match signal {
            Signal::Buy => units,
            Signal::Sell => -units,
            Signal::Hold => 0.0,
        })
    }
}
