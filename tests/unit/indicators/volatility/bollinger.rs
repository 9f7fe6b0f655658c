//! Unit tests for Bollinger Bands indicator

use perpscan::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};

#[test]
fn test_bollinger_known_values() {
    let bands = calculate_bollinger_bands(&[1.0, 2.0, 3.0], 3, 2.0);
    let half_width = 2.0 * (2.0f64 / 3.0).sqrt();

    assert_eq!(bands.middle, vec![0.0, 0.0, 2.0]);
    assert!((bands.upper[2] - (2.0 + half_width)).abs() < 1e-12);
    assert!((bands.lower[2] - (2.0 - half_width)).abs() < 1e-12);
    assert_eq!(bands.upper[..2], [0.0, 0.0]);
    assert_eq!(bands.lower[..2], [0.0, 0.0]);
}

#[test]
fn test_bollinger_constant_series_collapses() {
    let bands = calculate_bollinger_bands_default(&[50.0; 25]);
    assert_eq!(bands.period, 20);
    assert_eq!(bands.std_dev, 2.0);
    for i in 19..25 {
        assert_eq!(bands.upper[i], 50.0);
        assert_eq!(bands.middle[i], 50.0);
        assert_eq!(bands.lower[i], 50.0);
    }
}

#[test]
fn test_bollinger_band_ordering() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
    let bands = calculate_bollinger_bands_default(&closes);
    for i in 19..closes.len() {
        assert!(bands.lower[i] <= bands.middle[i]);
        assert!(bands.middle[i] <= bands.upper[i]);
    }
}
