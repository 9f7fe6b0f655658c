//! Unit tests for the risk validator

use crate::fixtures::start_time;
use perpscan::config::AccountConfig;
use perpscan::models::risk::{RiskDecision, RiskRejection};
use perpscan::models::signal::{Signal, SignalDirection};
use perpscan::risk::validator::RiskValidator;

fn signal(direction: SignalDirection, entry: f64, stop: f64, target: f64) -> Signal {
    Signal::new(
        "BTC",
        "1h",
        "test".to_string(),
        direction,
        entry,
        stop,
        target,
        start_time(),
    )
}

fn validator() -> RiskValidator {
    RiskValidator::new(AccountConfig::default())
}

fn rejection(decision: RiskDecision) -> RiskRejection {
    decision.reason().cloned().expect("expected a rejection")
}

#[test]
fn test_two_to_one_long_is_approved() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 1.0, 2.0));
    assert!(decision.is_valid());
    assert_eq!(decision.reason(), None);

    let sized = decision.signal().unwrap();
    assert_eq!(sized.stop_loss, 99.0);
    assert_eq!(sized.take_profit, 102.0);
    assert_eq!(sized.position_size, Some(10.0));
    assert_eq!(sized.suggested_leverage, Some(1));
}

#[test]
fn test_short_is_approved() {
    let decision = validator().validate(&signal(SignalDirection::Short, 100.0, 1.0, 2.0));
    let sized = decision.into_signal().unwrap();
    assert_eq!(sized.stop_loss, 101.0);
    assert_eq!(sized.take_profit, 98.0);
    assert_eq!(sized.position_size, Some(10.0));
}

#[test]
fn test_low_reward_rejected() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 1.0, 1.0));
    assert!(!decision.is_valid());
    assert!(decision.signal().is_none());

    let reason = rejection(decision);
    assert_eq!(reason, RiskRejection::RiskRewardTooLow { ratio: 1.0 });
    assert_eq!(reason.to_string(), "R/R too low: 1.00 (minimum 2.00)");
}

#[test]
fn test_sizing_scenario() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 2.0, 4.0));
    let sized = decision.into_signal().unwrap();
    assert_eq!(sized.suggested_leverage, Some(1));
    assert_eq!(sized.position_size, Some(5.0));
}

#[test]
fn test_zero_stop_distance() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 0.0, 0.0));
    assert_eq!(rejection(decision), RiskRejection::ZeroStopDistance);
}

#[test]
fn test_stop_too_tight() {
    let decision = validator().validate(&signal(SignalDirection::Long, 1000.0, 0.5, 1.0));
    assert!(matches!(
        rejection(decision),
        RiskRejection::StopTooTight { stop_pct } if (stop_pct - 0.0005).abs() < 1e-12
    ));
}

#[test]
fn test_stop_too_wide() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 15.0, 30.0));
    let reason = rejection(decision);
    assert!(matches!(reason, RiskRejection::StopTooWide { .. }));
    assert!(reason.to_string().starts_with("stop too wide (excessive volatility)"));
}

#[test]
fn test_ten_percent_stop_is_allowed() {
    let decision = validator().validate(&signal(SignalDirection::Long, 100.0, 10.0, 20.0));
    let sized = decision.into_signal().unwrap();
    assert_eq!(sized.position_size, Some(1.0));
    assert_eq!(sized.suggested_leverage, Some(1));
}

#[test]
fn test_levels_on_wrong_side() {
    let mut candidate = signal(SignalDirection::Long, 100.0, 1.0, 2.0);
    candidate.stop_loss = 101.0;
    assert_eq!(
        rejection(validator().validate(&candidate)),
        RiskRejection::LevelsOnWrongSide {
            direction: SignalDirection::Long
        }
    );
}

#[test]
fn test_invalid_account_and_entry() {
    let broke = RiskValidator::new(AccountConfig {
        balance: 0.0,
        ..AccountConfig::default()
    });
    assert_eq!(
        rejection(broke.validate(&signal(SignalDirection::Long, 100.0, 1.0, 2.0))),
        RiskRejection::InvalidAccount { balance: 0.0 }
    );

    assert_eq!(
        rejection(validator().validate(&signal(SignalDirection::Long, 0.0, 1.0, 2.0))),
        RiskRejection::InvalidEntry { entry: 0.0 }
    );
}

#[test]
fn test_leverage_clamp_applied_to_signal() {
    let validator = RiskValidator::new(AccountConfig {
        balance: 1000.0,
        risk_per_trade_pct: 1.0,
        max_leverage: 2,
    });
    // 10 / 0.5 = 20 units, 2000 notional on 1000 needs exactly 2x
    let sized = validator
        .validate(&signal(SignalDirection::Long, 100.0, 0.5, 1.0))
        .into_signal()
        .unwrap();
    assert_eq!(sized.suggested_leverage, Some(2));
    assert_eq!(sized.position_size, Some(20.0));

    let capped = RiskValidator::new(AccountConfig {
        max_leverage: 1,
        ..validator.account().clone()
    });
    let sized = capped
        .validate(&signal(SignalDirection::Long, 100.0, 0.5, 1.0))
        .into_signal()
        .unwrap();
    assert_eq!(sized.suggested_leverage, Some(1));
    assert_eq!(sized.position_size, Some(10.0));
}
