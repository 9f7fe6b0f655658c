//! Unit tests for position sizing

use perpscan::risk::sizing::{size_position, PositionSizing};

#[test]
fn test_unleveraged_position() {
    let sizing = size_position(1000.0, 1.0, 5, 100.0, 2.0);
    assert_eq!(
        sizing,
        PositionSizing {
            effective_risk_pct: 1.0,
            risk_amount: 10.0,
            position_size: 5.0,
            leverage: 1,
            clamped: false,
        }
    );
}

#[test]
fn test_leverage_rounds_up() {
    // 10 / 0.4 = 25 units, notional 2500 on a 1000 balance
    let sizing = size_position(1000.0, 1.0, 5, 100.0, 0.4);
    assert_eq!(sizing.position_size, 25.0);
    assert_eq!(sizing.leverage, 3);
    assert!(!sizing.clamped);
}

#[test]
fn test_leverage_clamped_to_maximum() {
    let sizing = size_position(1000.0, 1.0, 2, 100.0, 0.2);
    assert!(sizing.clamped);
    assert_eq!(sizing.leverage, 2);
    assert_eq!(sizing.position_size, 20.0);
}

#[test]
fn test_risk_capped_at_five_percent() {
    let sizing = size_position(1000.0, 10.0, 5, 100.0, 10.0);
    assert_eq!(sizing.effective_risk_pct, 5.0);
    assert_eq!(sizing.risk_amount, 50.0);
    assert_eq!(sizing.position_size, 5.0);
    assert_eq!(sizing.leverage, 1);
}

#[test]
fn test_size_rounded_to_six_decimals() {
    let sizing = size_position(1000.0, 1.0, 5, 100.0, 3.0);
    assert_eq!(sizing.position_size, 3.333333);
}

#[test]
fn test_clamped_size_stays_within_leverage_cap() {
    // 3000 / 7 = 428.5714285...; rounding to nearest would overshoot the cap.
    let sizing = size_position(1000.0, 5.0, 3, 7.0, 0.01);
    assert!(sizing.clamped);
    assert_eq!(sizing.leverage, 3);
    assert_eq!(sizing.position_size, 428.571428);
    assert!(sizing.position_size * 7.0 <= 3000.0);
}
