//! Replay source for deterministic tests.

use super::RandomSource;

/// Replays fixed lists of normals and uniforms, cycling when exhausted.
///
/// An empty list yields `0.0` for that kind of draw.
///
/// ```rust
/// use quant_sim::rng::{RandomSource, SequenceSource};
///
/// let mut source = SequenceSource::new(vec![1.0, -1.0], vec![0.9]);
/// assert_eq!(source.next_standard_normal(), 1.0);
/// assert_eq!(source.next_standard_normal(), -1.0);
/// assert_eq!(source.next_standard_normal(), 1.0);
/// assert_eq!(source.next_uniform(), 0.9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    normals: Vec<f64>,
    uniforms: Vec<f64>,
    normal_pos: usize,
    uniform_pos: usize,
}

impl SequenceSource {
    /// Creates a source from explicit draw lists.
    pub fn new(normals: Vec<f64>, uniforms: Vec<f64>) -> Self {
        Self {
            normals,
            uniforms,
            normal_pos: 0,
            uniform_pos: 0,
        }
    }

    /// Every normal is `z`; no uniforms.
    pub fn constant(z: f64) -> Self {
        Self::new(vec![z], Vec::new())
    }

    /// Number of normals consumed so far.
    pub fn normals_drawn(&self) -> usize {
        self.normal_pos
    }

    /// Number of uniforms consumed so far.
    pub fn uniforms_drawn(&self) -> usize {
        self.uniform_pos
    }

    fn cycle(values: &[f64], pos: &mut usize) -> f64 {
        let value = if values.is_empty() {
            0.0
        } else {
            values[*pos % values.len()]
        };
        *pos += 1;
        value
    }
}

impl RandomSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        Self::cycle(&self.uniforms, &mut self.uniform_pos)
    }

    fn next_standard_normal(&mut self) -> f64 {
        Self::cycle(&self.normals, &mut self.normal_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_draws() {
        let mut source = SequenceSource::constant(0.5);
        for _ in 0..3 {
            assert_eq!(source.next_standard_normal(), 0.5);
        }
        assert_eq!(source.next_uniform(), 0.0);
        assert_eq!(source.normals_drawn(), 3);
        assert_eq!(source.uniforms_drawn(), 1);
    }
}
