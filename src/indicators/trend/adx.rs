//! ADX (Average Directional Index) indicator
//!
//! +DM/-DM come from consecutive high/low deltas; only the larger positive
//! move counts and ties count as zero for both. +DI/-DI divide the raw
//! directional movement by the bar's ATR, and ADX is the Wilder average of DX.

use crate::common::math;
use crate::indicators::volatility::calculate_atr;
use crate::models::indicators::{AdxSeries, Candle};

/// Directional movement of bar `i` against bar `i - 1` as `(+DM, -DM)`.
pub fn directional_movement(candles: &[Candle], i: usize) -> (f64, f64) {
    if i == 0 || i >= candles.len() {
        return (0.0, 0.0);
    }

    let up_move = candles[i].high - candles[i - 1].high;
    let down_move = candles[i - 1].low - candles[i].low;

    let plus_dm = if up_move > down_move && up_move > 0.0 {
        up_move
    } else {
        0.0
    };
    let minus_dm = if down_move > up_move && down_move > 0.0 {
        down_move
    } else {
        0.0
    };
    (plus_dm, minus_dm)
}

/// Calculate ADX together with +DI and -DI.
pub fn calculate_adx(candles: &[Candle], period: usize) -> AdxSeries {
    let n = candles.len();
    if period == 0 {
        return AdxSeries {
            adx: vec![0.0; n],
            plus_di: vec![0.0; n],
            minus_di: vec![0.0; n],
            period,
        };
    }

    let atr = calculate_atr(candles, period);
    let mut plus_di = vec![0.0; n];
    let mut minus_di = vec![0.0; n];
    let mut dx = vec![0.0; n];

    for i in 0..n {
        let (plus_dm, minus_dm) = directional_movement(candles, i);
        let divisor = if atr[i] == 0.0 { 1.0 } else { atr[i] };

        plus_di[i] = 100.0 * plus_dm / divisor;
        minus_di[i] = 100.0 * minus_dm / divisor;

        let di_sum = plus_di[i] + minus_di[i];
        let di_sum = if di_sum == 0.0 { 1.0 } else { di_sum };
        dx[i] = 100.0 * (plus_di[i] - minus_di[i]).abs() / di_sum;
    }

    AdxSeries {
        adx: math::wilder_smooth(&dx, period),
        plus_di,
        minus_di,
        period,
    }
}

/// Calculate ADX with default period (14)
pub fn calculate_adx_default(candles: &[Candle]) -> AdxSeries {
    calculate_adx(candles, 14)
}
