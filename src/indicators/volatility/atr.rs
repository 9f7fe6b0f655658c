//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// True range per bar. The first bar has no previous close, so its true
/// range is `high - low`.
pub fn true_ranges(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            if i == 0 {
                candle.high - candle.low
            } else {
                math::true_range(candle.high, candle.low, candles[i - 1].close)
            }
        })
        .collect()
}

/// Calculate ATR (Average True Range)
///
/// Wilder average of the true range: seeded with the simple mean of the first
/// `period` true ranges at index `period - 1`, then
/// `atr[i] = (atr[i-1] * (period - 1) + tr[i]) / period`. Earlier indices hold 0.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Vec<f64> {
    math::wilder_smooth(&true_ranges(candles), period)
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Vec<f64> {
    calculate_atr(candles, 14)
}
