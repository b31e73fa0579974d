//! Signal command implementation
//!
//! Evaluates a trading rule on a price history:
//!
//! ```json
//! {
//!   "strategy": {"kind": {"kind": "rsi_mean_reversion", "period": 14, "oversold": 30, "overbought": 70}, "allocation": 0.1},
//!   "prices": [101.2, 100.8, 99.5],
//!   "capital": 100000
//! }
//! ```

use quant_models::signals::{Signal, TradingStrategy};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::read_json;
use crate::output::{self, num, OutputFormat, Tabular};
use crate::{CliError, Result};

/// JSON input of `quant signal`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalRequest {
    /// Rule and allocation.
    pub strategy: TradingStrategy,
    /// Closing prices, oldest first.
    pub prices: Vec<f64>,
    /// Capital available for sizing.
    pub capital: f64,
}

/// Latest signal and the position it implies.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    /// Decision for the latest bar.
    pub signal: Signal,
    /// Last price in the history.
    pub last_price: f64,
    /// Signed whole units to trade.
    pub position_size: f64,
}

impl Tabular for SignalReport {
    fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("Signal".into(), format!("{:?}", self.signal)),
            ("Last price".into(), num(self.last_price)),
            ("Position size".into(), format!("{:.0}", self.position_size)),
        ]
    }
}

/// Evaluates the request.
pub fn evaluate(request: &SignalRequest) -> Result<SignalReport> {
    request.strategy.validate()?;
    let last_price = *request
        .prices
        .last()
        .ok_or_else(|| CliError::InvalidArgument("price history is empty".to_string()))?;
    let signal = request.strategy.generate_signal(&request.prices)?;
    let position_size = request
        .strategy
        .position_size(signal, request.capital, last_price)?;
    Ok(SignalReport {
        signal,
        last_price,
        position_size,
    })
}

/// Run the signal command
pub fn run(input: &str, format: OutputFormat) -> Result<()> {
    info!("Loading signal request from {}", input);
    let request: SignalRequest = read_json(input)?;
    info!(bars = request.prices.len(), "Generating signal");
    output::emit(format, &evaluate(&request)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quant_models::signals::StrategyKind;

    #[test]
    fn test_oversold_buy() {
        let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        let request = SignalRequest {
            strategy: TradingStrategy::new(StrategyKind::rsi_default(), 0.1).unwrap(),
            prices,
            capital: 10_000.0,
        };
        let report = evaluate(&request).unwrap();
        assert_eq!(report.signal, Signal::Buy);
        assert_eq!(report.last_price, 81.0);
        assert_eq!(report.position_size, 12.0);
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "strategy": {"kind": {"kind": "moving_average_crossover", "fast_period": 2, "slow_period": 4}, "allocation": 0.5},
            "prices": [10.0, 10.0, 10.0, 10.0, 10.0],
            "capital": 1000.0
        }"#;
        let request: SignalRequest = serde_json::from_str(json).unwrap();
        let report = evaluate(&request).unwrap();
        assert_eq!(report.signal, Signal::Hold);
        assert_eq!(report.position_size, 0.0);
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let request = SignalRequest {
            strategy: TradingStrategy::new(StrategyKind::golden_cross(), 0.1).unwrap(),
            prices: vec![],
            capital: 1000.0,
        };
        assert!(evaluate(&request).is_err());
    }
}
