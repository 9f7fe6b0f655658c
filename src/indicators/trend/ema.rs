//! EMA (Exponential Moving Average) indicator

/// EMA seeded with the first input value.
///
/// `k = 2 / (period + 1)` and `ema[i] = values[i] * k + ema[i-1] * (1 - k)`.
/// Defined at every index; there is no warm-up gap.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![0.0; n];
    if period == 0 || n == 0 {
        return result;
    }

    let k = 2.0 / (period as f64 + 1.0);
    result[0] = values[0];
    for i in 1..n {
        result[i] = values[i] * k + result[i - 1] * (1.0 - k);
    }
    result
}

/// Cross direction of a fast EMA over a slow EMA between `prev` and `last`.
///
/// Returns 1 for a bullish cross, -1 for a bearish cross, 0 otherwise.
pub fn ema_cross_at(fast: &[f64], slow: &[f64], last: usize) -> i32 {
    if last == 0 || last >= fast.len() || last >= slow.len() {
        return 0;
    }
    let prev = last - 1;

    if fast[prev] <= slow[prev] && fast[last] > slow[last] {
        1
    } else if fast[prev] >= slow[prev] && fast[last] < slow[last] {
        -1
    } else {
        0
    }
}
