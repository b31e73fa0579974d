//! Rayon fan-out over path indices.
//!
//! Results are collected by index, so the output order never depends on
//! scheduling.

use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum paths handed to one rayon task.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Path count below which simulation stays on the calling thread.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallelConfig {
    /// Minimum items per rayon task
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Never parallelise.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Evaluates `f(0), f(1), .., f(n - 1)` and returns the results in index
/// order, in parallel when `config` allows.
pub fn map_indices<R, F>(n: usize, config: &ParallelConfig, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    if config.should_parallelize(n) {
        (0..n)
            .into_par_iter()
            .with_min_len(config.batch_size.max(1))
            .map(f)
            .collect()
    } else {
        (0..n).map(f).collect()
    }
}
