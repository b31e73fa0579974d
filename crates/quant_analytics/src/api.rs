//! Function-call boundary of the calculation core.
//!
//! Every function validates its inputs, returns `QuantResult`, and takes
//! and returns plain serialisable structs.
//!
//! ```rust
//! use quant_analytics::api;
//! use quant_models::instruments::{OptionLeg, OptionStrategy, OptionType};
//!
//! let strategy = OptionStrategy::new(vec![OptionLeg::buy(OptionType::Call, 100.0, 1.0, 5.0)]);
//! let points = api::strategy_payoff(&strategy, &[120.0]).unwrap();
//! assert_eq!(points[0].payoff, 15.0);
//! ```

use quant_core::math::correlation::CorrelationMatrix;
use quant_core::QuantResult;
use quant_models::analytical::{self, BlackScholes, Greeks, ImpliedVolatility, OptionPrices};
use quant_models::instruments::{OptionParameters, OptionStrategy, OptionType, PayoffPoint};
use quant_sim::mc::{
    CorrelatedPathSimulator, GbmResult, JumpConfig, PathSimulator, PortfolioAsset, PortfolioResults,
    SimulationConfig, SimulationParameters,
};

use crate::statistics::{Ensemble, RiskMetrics, SimulationStatistics, StatisticsConfig, StatisticsEngine};

fn seeded_config(seed: Option<u64>) -> QuantResult<SimulationConfig> {
    Ok(SimulationConfig::builder().maybe_seed(seed).build()?)
}

/// Simulates single-asset GBM paths, optionally with jumps.
///
/// `seed = None` draws a fresh seed from entropy.
pub fn simulate_gbm(
    params: &SimulationParameters,
    jump: Option<&JumpConfig>,
    seed: Option<u64>,
) -> QuantResult<GbmResult> {
    let simulator = PathSimulator::new(*params, jump.copied(), seeded_config(seed)?)?;
    Ok(simulator.simulate())
}

/// Simulates a correlated portfolio.
pub fn simulate_portfolio(
    assets: &[PortfolioAsset],
    correlation: &CorrelationMatrix,
    time_horizon_days: usize,
    num_paths: usize,
    seed: Option<u64>,
) -> QuantResult<PortfolioResults> {
    let simulator = CorrelatedPathSimulator::new(
        assets.to_vec(),
        correlation,
        time_horizon_days,
        num_paths,
        seeded_config(seed)?,
    )?;
    Ok(simulator.simulate())
}

/// Summarises an ensemble's terminal distribution.
pub fn summarize_simulation(ensemble: &Ensemble, annualization_factor: f64) -> QuantResult<SimulationStatistics> {
    let engine = StatisticsEngine::new(StatisticsConfig {
        annualization_factor,
        ..StatisticsConfig::default()
    })?;
    engine.summarize(ensemble)
}

/// VaR, CVaR, Sharpe, Sortino and drawdown at tail probability `confidence`.
pub fn compute_risk_metrics(ensemble: &Ensemble, confidence: f64) -> QuantResult<RiskMetrics> {
    StatisticsEngine::default().risk_metrics(ensemble, confidence)
}

/// Black-Scholes call and put premiums.
pub fn black_scholes_price(params: &OptionParameters) -> QuantResult<OptionPrices> {
    Ok(BlackScholes::new(*params)?.price())
}

/// Black-Scholes Greeks in desk units.
pub fn black_scholes_greeks(params: &OptionParameters, option_type: OptionType) -> QuantResult<Greeks> {
    Ok(BlackScholes::new(*params)?.greeks(option_type))
}

/// Implied volatility with its convergence flag.
pub fn implied_volatility(
    market_price: f64,
    params: &OptionParameters,
    option_type: OptionType,
) -> QuantResult<ImpliedVolatility> {
    analytical::implied_volatility(market_price, params, option_type)
}

/// Expiry payoff of a multi-leg strategy at each spot.
pub fn strategy_payoff(strategy: &OptionStrategy, spots: &[f64]) -> QuantResult<Vec<PayoffPoint>> {
    strategy.payoff(spots)
}
