//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::trend::calculate_sma;
use crate::models::indicators::BollingerBands;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
///
/// All three bands hold 0 before index `period - 1`.
pub fn calculate_bollinger_bands(closes: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    let n = closes.len();
    let middle = calculate_sma(closes, period);
    let mut upper = vec![0.0; n];
    let mut lower = vec![0.0; n];

    if period > 0 && n >= period {
        for i in (period - 1)..n {
            let window = &closes[i + 1 - period..=i];
            let half_width = std_dev * math::population_std_dev(window).unwrap_or(0.0);
            upper[i] = middle[i] + half_width;
            lower[i] = middle[i] - half_width;
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
        period,
        std_dev,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(closes: &[f64]) -> BollingerBands {
    calculate_bollinger_bands(closes, 20, 2.0)
}
