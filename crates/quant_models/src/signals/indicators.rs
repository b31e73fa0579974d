//! Technical indicators over a price history (oldest first).
//!
//! Each indicator looks at the most recent window and returns `None` when
//! the history is too short.

/// Simple moving average of the last `period` prices.
///
/// # Examples
/// ```
/// use quant_models::signals::sma;
///
/// assert_eq!(sma(&[1.0, 2.0, 3.0, 4.0], 2), Some(3.5));
/// assert_eq!(sma(&[1.0], 2), None);
/// ```
pub fn sma(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period {
        return None;
    }
    let window = &prices[prices.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Wilder's relative strength index over `period` price changes.
///
/// The first average gain and loss are simple means over the first
/// `period` changes; later changes are folded in with Wilder smoothing.
/// Needs at least `period + 1` prices. Returns 100 when there are no
/// losses and 50 for a flat series.
pub fn rsi(prices: &[f64], period: usize) -> Option<f64> {
    if period == 0 || prices.len() < period + 1 {
        return None;
    }
    let changes: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let n = period as f64;

    let (seed, rest) = changes.split_at(period);
    let mut avg_gain = seed.iter().filter(|c| **c > 0.0).sum::<f64>() / n;
    let mut avg_loss = -seed.iter().filter(|c| **c < 0.0).sum::<f64>() / n;

    for &change in rest {
        avg_gain = (avg_gain * (n - 1.0) + change.max(0.0)) / n;
        avg_loss = (avg_loss * (n - 1.0) + (-change).max(0.0)) / n;
    }

    if avg_loss == 0.0 {
        return Some(if avg_gain == 0.0 { 50.0 } else { 100.0 });
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Bollinger band values at the latest price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    /// Middle band minus `k` standard deviations
    pub lower: f64,
    /// Simple moving average
    pub middle: f64,
    /// Middle band plus `k` standard deviations
    pub upper: f64,
}

/// Bollinger bands over the last `period` prices, `num_std` population
/// standard deviations wide.
pub fn bollinger_bands(prices: &[f64], period: usize, num_std: f64) -> Option<BollingerBands> {
    let middle = sma(prices, period)?;
    let window = &prices[prices.len() - period..];
    let variance = window.iter().map(|p| (p - middle).powi(2)).sum::<f64>() / period as f64;
    let width = num_std * variance.sqrt();
    Some(BollingerBands {
        lower: middle - width,
        middle,
        upper: middle + width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_uses_latest_window() {
        let prices = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(sma(&prices, 3), Some(40.0));
        assert_eq!(sma(&prices, 5), Some(30.0));
        assert_eq!(sma(&prices, 6), None);
        assert_eq!(sma(&prices, 0), None);
    }

    #[test]
    fn test_rsi_extremes() {
        let rising: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_eq!(rsi(&rising, 14), Some(100.0));

        let falling: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_relative_eq!(rsi(&falling, 14).unwrap(), 0.0, epsilon = 1e-12);

        assert_eq!(rsi(&[5.0; 20], 14), Some(50.0));
        assert_eq!(rsi(&rising[..14], 14), None);
    }

    #[test]
    fn test_rsi_balanced_moves() {
        // Alternating +1/-1 over an even number of changes: equal averages
        let prices = [10.0, 11.0, 10.0, 11.0, 10.0];
        assert_relative_eq!(rsi(&prices, 4).unwrap(), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bollinger_bands() {
        let prices = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = bollinger_bands(&prices, 8, 2.0).unwrap();
        assert_relative_eq!(bands.middle, 5.0);
        assert_relative_eq!(bands.upper, 9.0);
        assert_relative_eq!(bands.lower, 1.0);
        assert!(bollinger_bands(&prices, 9, 2.0).is_none());
    }
}
