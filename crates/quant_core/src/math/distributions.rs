//! Standard normal density and distribution.
//!
//! `Φ` is evaluated through the complementary error function,
//! `Φ(x) = ½·erfc(−x/√2)`, with erfc from Abramowitz & Stegun 7.1.26
//! (absolute error ≤ 1.5e-7). Both functions are generic over `Float`.

use num_traits::Float;

/// `1/√(2π)`.
const INV_SQRT_TAU: f64 = 0.398_942_280_401_432_7;

/// A&S 7.1.26 rational coefficient.
const AS_P: f64 = 0.327_591_1;

/// A&S 7.1.26 polynomial coefficients `a1..a5`, lowest order first.
const AS_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

#[inline]
fn cast<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// `erfc(x)` for any finite `x`, reflecting negative arguments through
/// `erfc(−x) = 2 − erfc(x)`.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let z = x.abs();
    let t = T::one() / (T::one() + cast::<T>(AS_P) * z);
    // a1·t + a2·t² + ... + a5·t⁵, in Horner form
    let poly = AS_A
        .iter()
        .rev()
        .fold(T::zero(), |acc, &a| (acc + cast::<T>(a)) * t);
    let tail = poly * (-z * z).exp();
    if x.is_sign_negative() {
        cast::<T>(2.0) - tail
    } else {
        tail
    }
}

/// `P(Z ≤ x)` for `Z ~ N(0, 1)`.
///
/// # Examples
/// ```
/// use quant_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96_f64) - 0.975).abs() < 1e-4);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    cast::<T>(0.5) * erfc(-x * cast::<T>(std::f64::consts::FRAC_1_SQRT_2))
}

/// `φ(x) = e^{−x²/2} / √(2π)`.
///
/// # Examples
/// ```
/// use quant_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_28).abs() < 1e-8);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    cast::<T>(INV_SQRT_TAU) * (-(x * x) * cast::<T>(0.5)).exp()
}
