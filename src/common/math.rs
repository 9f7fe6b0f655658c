//! Numeric primitives shared by the indicator library and the risk stage.

/// Arithmetic mean. Returns `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation of a window.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values.iter().map(|v| (v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// True range of a bar given the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Wilder moving average.
///
/// Seeded at index `period - 1` with the simple mean of the first `period`
/// values, then `out[i] = (out[i-1] * (period - 1) + values[i]) / period`.
/// Indices before the seed hold 0.
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut out = vec![0.0; n];
    if period == 0 || n < period {
        return out;
    }

    let seed = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = seed;

    let weight = (period - 1) as f64;
    for i in period..n {
        out[i] = (out[i - 1] * weight + values[i]) / period as f64;
    }
    out
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Truncate toward negative infinity at a fixed number of decimal places.
pub fn floor_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).floor() / factor
}
