//! # Quant Sim (L3: Simulation Engine)
//!
//! Monte Carlo price path generation.
//!
//! ## Components
//!
//! - [`rng`]: the [`RandomSource`](rng::RandomSource) seam, a seeded
//!   Box-Muller generator, a replay source for tests and per-path streams
//! - [`mc`]: single-asset GBM with an optional jump overlay, and correlated
//!   multi-asset portfolios driven by a Cholesky factor
//! - [`parallel`]: index-ordered rayon fan-out
//!
//! ## Determinism
//!
//! Every path owns its own generator derived from `(seed, path_index)`, so a
//! seeded run returns the same numbers whether it executes on one thread or
//! many.
//!
//! ```rust
//! use quant_sim::mc::{PathSimulator, SimulationConfig, SimulationParameters};
//!
//! let params = SimulationParameters::new(100.0, 0.07, 0.2, 252, 1_000);
//! let config = SimulationConfig::builder().seed(42).build().unwrap();
//! let simulator = PathSimulator::new(params, None, config).unwrap();
//!
//! let a = simulator.simulate();
//! let b = simulator.simulate();
//! assert_eq!(a.final_values, b.final_values);
//! assert_eq!(a.paths[0].len(), 253);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod mc;
pub mod parallel;
pub mod rng;
