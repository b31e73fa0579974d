//! # Quant Analytics (L4: Application Layer)
//!
//! Turns simulated ensembles and return series into decision numbers, and
//! exposes the whole calculation core as plain functions.
//!
//! - [`statistics`]: ensemble summaries, VaR/CVaR, Sharpe/Sortino, drawdown
//! - [`risk_manager`]: beta, alpha, tracking error and information ratio
//! - [`allocation`]: heuristic portfolio weights
//! - [`api`]: the function-call boundary used by callers and the CLI
//!
//! ## Sentinels
//!
//! Ratios with a zero denominator are reported as `0.0`, never NaN or
//! infinity, so every output stays JSON-safe.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod allocation;
pub mod api;
pub mod moments;
pub mod risk_manager;
pub mod statistics;

pub use risk_manager::{RatioReport, RiskManager};
pub use statistics::{Ensemble, RiskMetrics, SimulationStatistics, StatisticsConfig, StatisticsEngine};
