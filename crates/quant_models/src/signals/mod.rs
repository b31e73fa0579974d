//! Rule-based trading signals.
//!
//! A [`TradingStrategy`] is plain data: a [`StrategyKind`] holding the rule's
//! parameters plus the fraction of capital committed per trade. Evaluation
//! is a pure function of the price history, newest price last.

pub mod indicators;
pub mod strategy;

pub use indicators::{bollinger_bands, rsi, sma, BollingerBands};
pub use strategy::{Signal, StrategyKind, TradingStrategy};
