//! Single-asset GBM path simulation with an optional jump overlay.

use quant_core::QuantResult;

use super::config::{JumpConfig, SimulationConfig, SimulationParameters};
use super::gbm::GbmStep;
use crate::parallel::map_indices;
use crate::rng::{PathStreams, RandomSource};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Simulated paths and their terminal prices.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GbmResult {
    /// One path per simulation, `time_horizon_days + 1` prices each with the
    /// starting price at index 0. Empty when paths are not kept.
    pub paths: Vec<Vec<f64>>,
    /// Terminal price per simulation.
    pub final_values: Vec<f64>,
}

/// Generates independent GBM price paths for one asset.
///
/// Per day one normal `Z` is drawn; with a jump overlay a uniform `u`
/// follows, and a second normal `Z'` only when `u < jump_intensity`.
///
/// # Examples
///
/// ```rust
/// use quant_sim::mc::{PathSimulator, SimulationConfig, SimulationParameters};
///
/// let params = SimulationParameters::new(100.0, 0.0, 0.0, 10, 1);
/// let simulator = PathSimulator::new(params, None, SimulationConfig::default()).unwrap();
/// assert_eq!(simulator.simulate().final_values, vec![100.0]);
/// ```
#[derive(Clone, Debug)]
pub struct PathSimulator {
    params: SimulationParameters,
    jump: Option<JumpConfig>,
    step: GbmStep,
    config: SimulationConfig,
}

impl PathSimulator {
    /// Validates inputs and prepares the simulator.
    ///
    /// # Errors
    ///
    /// `QuantError::InvalidParameter` for invalid parameters or jump overlay.
    pub fn new(
        params: SimulationParameters,
        jump: Option<JumpConfig>,
        config: SimulationConfig,
    ) -> QuantResult<Self> {
        params.validate()?;
        if let Some(jump) = &jump {
            jump.validate()?;
        }
        Ok(Self {
            step: GbmStep::new(params.expected_return, params.volatility),
            params,
            jump,
            config,
        })
    }

    /// Returns the simulation parameters.
    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Returns the jump overlay, if any.
    #[inline]
    pub fn jump(&self) -> Option<&JumpConfig> {
        self.jump.as_ref()
    }

    /// Returns the run configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every path sequentially on draws from `rng`.
    ///
    /// Paths consume draws in order, so a replayed source reproduces the run
    /// exactly.
    pub fn simulate_with<R: RandomSource>(&self, rng: &mut R) -> GbmResult {
        let runs: Vec<_> = (0..self.params.num_paths).map(|_| self.run_path(rng)).collect();
        self.assemble(runs)
    }

    /// Runs with the configured seed, or a fresh entropy seed if none is set.
    pub fn simulate(&self) -> GbmResult {
        let seed = self.config.seed().unwrap_or_else(rand::random);
        self.simulate_seeded(seed)
    }

    /// Runs with per-path streams under `seed`, in parallel when the path
    /// count reaches the configured threshold.
    pub fn simulate_seeded(&self, seed: u64) -> GbmResult {
        let num_paths = self.params.num_paths;
        tracing::debug!(
            seed,
            num_paths,
            days = self.params.time_horizon_days,
            jumps = self.jump.is_some(),
            "simulating GBM paths"
        );

        let streams = PathStreams::new(seed);
        let runs = map_indices(num_paths, self.config.parallel(), |i| {
            let mut rng = streams.stream(i);
            self.run_path(&mut rng)
        });

        let result = self.assemble(runs);
        tracing::debug!(num_paths = result.final_values.len(), "GBM simulation finished");
        result
    }

    fn run_path<R: RandomSource>(&self, rng: &mut R) -> (Vec<f64>, f64) {
        let days = self.params.time_horizon_days;
        let keep = self.config.keep_paths();
        let mut path = Vec::with_capacity(if keep { days + 1 } else { 0 });
        let mut price = self.params.current_price;
        if keep {
            path.push(price);
        }

        for _ in 0..days {
            let z = rng.next_standard_normal();
            let mut log_return = self.step.log_return(z);
            if let Some(jump) = &self.jump {
                if rng.next_uniform() < jump.jump_intensity {
                    log_return += jump.jump_mean + jump.jump_std * rng.next_standard_normal();
                }
            }
            price *= log_return.exp();
            if keep {
                path.push(price);
            }
        }
        (path, price)
    }

    fn assemble(&self, runs: Vec<(Vec<f64>, f64)>) -> GbmResult {
        let (paths, final_values): (Vec<_>, Vec<_>) = runs.into_iter().unzip();
        GbmResult {
            paths: if self.config.keep_paths() { paths } else { Vec::new() },
            final_values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use approx::assert_relative_eq;

    fn seeded(seed: u64) -> SimulationConfig {
        SimulationConfig::builder().seed(seed).build().unwrap()
    }

    #[test]
    fn test_zero_volatility_is_deterministic_drift() {
        let params = SimulationParameters::new(50.0, 0.1, 0.0, 20, 5);
        let result = PathSimulator::new(params, None, seeded(1)).unwrap().simulate();
        let daily = 0.1 / 252.0;
        for path in &result.paths {
            for (day, price) in path.iter().enumerate() {
                assert_relative_eq!(*price, 50.0 * (daily * day as f64).exp(), max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_path_shape() {
        let params = SimulationParameters::new(100.0, 0.05, 0.3, 30, 7);
        let result = PathSimulator::new(params, None, seeded(3)).unwrap().simulate();
        assert_eq!(result.paths.len(), 7);
        assert_eq!(result.final_values.len(), 7);
        for (path, last) in result.paths.iter().zip(&result.final_values) {
            assert_eq!(path.len(), 31);
            assert_eq!(path[0], 100.0);
            assert_eq!(path.last(), Some(last));
            assert!(path.iter().all(|p| *p > 0.0));
        }
    }

    #[test]
    fn test_replayed_draws() {
        // Z = +1 then -1 cancels the diffusion term
        let params = SimulationParameters::new(100.0, 0.0, 0.2, 2, 1);
        let simulator = PathSimulator::new(params, None, SimulationConfig::default()).unwrap();
        let mut source = SequenceSource::new(vec![1.0, -1.0], Vec::new());
        let result = simulator.simulate_with(&mut source);

        let drift: f64 = -0.5 * 0.04 / 252.0;
        assert_relative_eq!(result.final_values[0], 100.0 * (2.0 * drift).exp(), max_relative = 1e-12);
        assert_eq!(source.normals_drawn(), 2);
    }

    #[test]
    fn test_jump_draw_order() {
        let params = SimulationParameters::new(100.0, 0.0, 0.0, 3, 1);
        let jump = JumpConfig::new(0.5, 0.1, 0.0);
        let simulator = PathSimulator::new(params, Some(jump), SimulationConfig::default()).unwrap();

        // Days 1 and 3 jump, day 2 does not
        let mut source = SequenceSource::new(vec![0.0], vec![0.1, 0.9, 0.2]);
        let result = simulator.simulate_with(&mut source);

        assert_relative_eq!(result.final_values[0], 100.0 * 0.2_f64.exp(), max_relative = 1e-12);
        assert_eq!(source.uniforms_drawn(), 3);
        assert_eq!(source.normals_drawn(), 5);
    }

    #[test]
    fn test_keep_paths_false() {
        let params = SimulationParameters::new(100.0, 0.05, 0.2, 10, 4);
        let config = SimulationConfig::builder().seed(9).keep_paths(false).build().unwrap();
        let lean = PathSimulator::new(params, None, config).unwrap().simulate();
        let full = PathSimulator::new(params, None, seeded(9)).unwrap().simulate();
        assert!(lean.paths.is_empty());
        assert_eq!(lean.final_values, full.final_values);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let params = SimulationParameters::new(100.0, 0.05, 0.2, 0, 10);
        assert!(PathSimulator::new(params, None, SimulationConfig::default()).is_err());

        let params = SimulationParameters::new(100.0, 0.05, 0.2, 10, 10);
        let jump = JumpConfig::new(2.0, 0.0, 0.1);
        assert!(PathSimulator::new(params, Some(jump), SimulationConfig::default()).is_err());
    }
}
