//! SMA (Simple Moving Average) indicator

/// Trailing arithmetic mean over `period` values.
///
/// Indices below `period - 1` hold 0. Each output only depends on the
/// current and previous `period - 1` inputs.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![0.0; n];
    if period == 0 || n < period {
        return result;
    }

    for i in (period - 1)..n {
        let window = &values[i + 1 - period..=i];
        result[i] = window.iter().sum::<f64>() / period as f64;
    }
    result
}
