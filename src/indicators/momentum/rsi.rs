//! RSI (Relative Strength Index) indicator
//!
//! RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss, with
//! Wilder smoothing of both averages.

/// Neutral value held through the warm-up window.
pub const RSI_NEUTRAL: f64 = 50.0;

/// Calculate the RSI series.
///
/// Averages are seeded from the first `period` price changes and updated
/// with weight `(period - 1) / period` from index `period + 1` onward.
/// Indices `<= period` hold [`RSI_NEUTRAL`]. A zero average loss reads 100,
/// so a constant series is 50 during warm-up and 100 after it.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![RSI_NEUTRAL; n];
    if period == 0 || n <= period {
        return result;
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change > 0.0 {
            avg_gain += change;
        } else {
            avg_loss -= change;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;

    let weight = (period - 1) as f64;
    for i in (period + 1)..n {
        let change = closes[i] - closes[i - 1];
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { -change } else { 0.0 };

        avg_gain = (avg_gain * weight + gain) / period as f64;
        avg_loss = (avg_loss * weight + loss) / period as f64;

        result[i] = rsi_value(avg_gain, avg_loss);
    }
    result
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Vec<f64> {
    calculate_rsi(closes, 14)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
