//! Sample moments and path measures shared by the statistics engine and the
//! risk manager.
//!
//! Inputs are assumed non-empty and finite; callers validate first.

/// Arithmetic mean.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by `n`).
pub fn population_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Sample variance (divides by `n - 1`); zero for a single value.
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Sample covariance of two equal-length series.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() < 2 {
        return 0.0;
    }
    let (mx, my) = (mean(xs), mean(ys));
    xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum::<f64>() / (xs.len() - 1) as f64
}

/// `sqrt(Σ (r - target)² / n_down)` over returns strictly below `target`,
/// or `None` when no return falls below it.
pub fn downside_deviation(returns: &[f64], target: f64) -> Option<f64> {
    let (sum_sq, count) = returns
        .iter()
        .filter(|r| **r < target)
        .fold((0.0, 0usize), |(s, n), r| (s + (r - target).powi(2), n + 1));
    (count > 0).then(|| (sum_sq / count as f64).sqrt())
}

/// Largest peak-to-trough decline as a fraction of the running peak.
///
/// # Examples
/// ```
/// use quant_analytics::moments::max_drawdown;
///
/// assert_eq!(max_drawdown(&[100.0, 120.0, 90.0, 130.0]), 0.25);
/// assert_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
/// ```
pub fn max_drawdown(path: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst: f64 = 0.0;
    for &value in path {
        peak = peak.max(value);
        if peak > 0.0 {
            worst = worst.max((peak - value) / peak);
        }
    }
    worst
}

/// Denominators smaller than this in magnitude are treated as zero.
pub const MIN_DENOMINATOR: f64 = 1e-12;

/// `numerator / denominator`, or `0.0` when the denominator is (numerically)
/// zero or the quotient is not finite.
#[inline]
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator.abs() < MIN_DENOMINATOR {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
