//! Random number sources for path simulation.
//!
//! Simulators never reach for a global generator: randomness is always
//! injected through [`RandomSource`], either by the caller or from
//! [`PathStreams`].

pub mod box_muller;
pub mod sequence;
pub mod streams;

pub use box_muller::BoxMullerRng;
pub use sequence::SequenceSource;
pub use streams::PathStreams;

/// Supplier of uniform and standard normal draws.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Standard normal draw.
    fn next_standard_normal(&mut self) -> f64;

    /// Fills `buffer` with standard normals, in order.
    fn fill_normal(&mut self, buffer: &mut [f64]) {
        for slot in buffer.iter_mut() {
            *slot = self.next_standard_normal();
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }

    #[inline]
    fn next_standard_normal(&mut self) -> f64 {
        (**self).next_standard_normal()
    }
}
