//! Monte Carlo path simulation.
//!
//! # Architecture
//!
//! ```text
//! PathSimulator / CorrelatedPathSimulator
//! ├── SimulationParameters / PortfolioAsset  (what to simulate)
//! ├── SimulationConfig                       (seed, keep_paths, rayon)
//! ├── GbmStep                                (daily log-space step)
//! └── RandomSource                           (injected or per-path stream)
//! ```

pub mod config;
pub mod error;
pub mod gbm;
pub mod paths;
pub mod portfolio;

pub use config::{
    JumpConfig, SimulationConfig, SimulationConfigBuilder, SimulationParameters, MAX_HORIZON_DAYS,
    MAX_PATHS, TRADING_DAYS_PER_YEAR,
};
pub use error::SimulationError;
pub use gbm::GbmStep;
pub use paths::{GbmResult, PathSimulator};
pub use portfolio::{CorrelatedPathSimulator, PortfolioAsset, PortfolioResults};
