//! Unit tests for the per-symbol signal pipeline

use std::cell::RefCell;

use crate::fixtures::{flat_candles, long_setup, tight_stop_setup, volatility_spike};
use perpscan::config::Config;
use perpscan::core::pipeline::SignalPipeline;
use perpscan::models::regime::Regime;
use perpscan::models::risk::RiskRejection;
use perpscan::models::signal::{SignalDirection, SignalStatus};
use perpscan::signals::rejection::{RejectionReason, RejectionStage};

fn pipeline() -> SignalPipeline {
    SignalPipeline::new(&Config::default())
}

#[test]
fn test_trending_symbol_produces_sized_signal() {
    let baseline = long_setup();
    let requested = RefCell::new(Vec::new());

    let report = pipeline().run_symbol("BTC", &baseline, |timeframe| {
        requested.borrow_mut().push(timeframe.to_string());
        if timeframe == "5m" {
            long_setup()
        } else {
            Vec::new()
        }
    });

    assert_eq!(report.symbol, "BTC");
    assert_eq!(report.assessment.regime, Regime::Trending);
    assert_eq!(requested.into_inner(), vec!["5m", "15m"]);

    assert_eq!(report.confirmed.len(), 1);
    let signal = &report.confirmed[0];
    assert_eq!(signal.timeframe, "5m");
    assert_eq!(signal.direction, SignalDirection::Long);
    assert_eq!(signal.status, SignalStatus::Pending);
    assert_eq!(signal.position_size, Some(4.954972));
    assert_eq!(signal.suggested_leverage, Some(5));

    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].timeframe, "15m");
    assert_eq!(
        report.rejections[0].reason,
        RejectionReason::InsufficientHistory {
            bars: 0,
            required: 200
        }
    );
}

#[test]
fn test_volatility_veto_skips_all_timeframes() {
    let mut calls = 0;
    let report = pipeline().run_symbol("ETH", &volatility_spike(60), |_| {
        calls += 1;
        long_setup()
    });

    assert_eq!(calls, 0);
    assert!(report.confirmed.is_empty());
    assert_eq!(report.rejections.len(), 1);

    let veto = &report.rejections[0];
    assert_eq!(veto.timeframe, "5m");
    assert_eq!(veto.stage(), RejectionStage::Regime);
    assert!(matches!(
        veto.reason,
        RejectionReason::VolatilityAnomaly { .. }
    ));
}

#[test]
fn test_short_baseline_uses_transition_pair() {
    let mut requested = Vec::new();
    let report = pipeline().run_symbol("SOL", &flat_candles(20, 10.0), |timeframe| {
        requested.push(timeframe.to_string());
        Vec::new()
    });

    assert_eq!(report.assessment.regime, Regime::Undetermined);
    assert_eq!(requested, vec!["15m", "1h"]);
    assert_eq!(report.rejections.len(), 2);
    assert!(report.confirmed.is_empty());
}

#[test]
fn test_risk_rejections_are_logged() {
    let report = pipeline().evaluate_timeframe("BTC", "5m", &tight_stop_setup());

    assert!(report.confirmed.is_empty());
    assert_eq!(report.rejections.len(), 1);

    let rejection = &report.rejections[0];
    assert_eq!(rejection.stage(), RejectionStage::Risk);
    assert!(matches!(
        rejection.reason,
        RejectionReason::Risk {
            rejection: RiskRejection::StopTooTight { .. }
        }
    ));
    assert!(rejection
        .to_string()
        .starts_with("[BTC 5m] risk: stop too tight (noise)"));
}

#[test]
fn test_volatility_veto_helper() {
    let pipeline = pipeline();
    let calm = pipeline.assess(&long_setup());
    assert!(pipeline.volatility_veto("BTC", &calm).is_none());

    let spiky = pipeline.assess(&volatility_spike(60));
    let veto = pipeline.volatility_veto("BTC", &spiky).unwrap();
    assert!(veto.to_string().starts_with("[BTC 5m] volatility anomaly"));
}
