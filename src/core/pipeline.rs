//! Per-symbol signal pipeline: select regime, run confluence, validate risk.
//!
//! Pure and synchronous. The same inputs always produce the same report, so
//! callers may run symbols in parallel without coordination.

use tracing::{debug, info};

use crate::config::Config;
use crate::models::indicators::Candle;
use crate::models::regime::RegimeAssessment;
use crate::models::risk::RiskDecision;
use crate::models::signal::Signal;
use crate::regime::RegimeClassifier;
use crate::risk::RiskValidator;
use crate::signals::engine::ConfluenceEngine;
use crate::signals::rejection::{Rejection, RejectionReason};

/// Outcome for one (symbol, timeframe).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeframeReport {
    pub timeframe: String,
    pub confirmed: Vec<Signal>,
    pub rejections: Vec<Rejection>,
}

/// Outcome for one symbol across its selected timeframes.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolReport {
    pub symbol: String,
    pub assessment: RegimeAssessment,
    pub confirmed: Vec<Signal>,
    pub rejections: Vec<Rejection>,
}

impl SymbolReport {
    pub fn new(symbol: &str, assessment: RegimeAssessment) -> Self {
        Self {
            symbol: symbol.to_string(),
            assessment,
            confirmed: Vec::new(),
            rejections: Vec::new(),
        }
    }

    fn absorb(&mut self, report: TimeframeReport) {
        self.confirmed.extend(report.confirmed);
        self.rejections.extend(report.rejections);
    }
}

#[derive(Debug, Clone)]
pub struct SignalPipeline {
    classifier: RegimeClassifier,
    validator: RiskValidator,
    baseline_timeframe: String,
}

impl SignalPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: RegimeClassifier::new(config.timeframes.clone()),
            validator: RiskValidator::new(config.account.clone()),
            baseline_timeframe: config.baseline_timeframe.clone(),
        }
    }

    pub fn baseline_timeframe(&self) -> &str {
        &self.baseline_timeframe
    }

    /// Classify the regime of a baseline series.
    pub fn assess(&self, baseline: &[Candle]) -> RegimeAssessment {
        self.classifier.classify(baseline)
    }

    /// Rejection raised when the assessment carries the volatility veto.
    pub fn volatility_veto(&self, symbol: &str, assessment: &RegimeAssessment) -> Option<Rejection> {
        if !assessment.is_volatile {
            return None;
        }
        Some(Rejection::new(
            symbol,
            &self.baseline_timeframe,
            RejectionReason::VolatilityAnomaly {
                latest_atr: assessment.latest_atr,
                mean_atr: assessment.mean_atr,
            },
        ))
    }

    /// Run confluence on one timeframe and pass each candidate through the
    /// risk gate.
    pub fn evaluate_timeframe(
        &self,
        symbol: &str,
        timeframe: &str,
        candles: &[Candle],
    ) -> TimeframeReport {
        let outcome = ConfluenceEngine::evaluate(symbol, timeframe, candles);
        let mut report = TimeframeReport {
            timeframe: timeframe.to_string(),
            confirmed: Vec::new(),
            rejections: outcome.rejections,
        };

        for candidate in outcome.signals {
            match self.validator.validate(&candidate) {
                RiskDecision::Approved(signal) => report.confirmed.push(signal),
                RiskDecision::Rejected(reason) => {
                    report
                        .rejections
                        .push(Rejection::new(symbol, timeframe, reason));
                }
            }
        }
        report
    }

    /// Entry point for one symbol: classify the baseline, then evaluate each
    /// selected timeframe with candles from `candles_for`.
    pub fn run_symbol<F>(&self, symbol: &str, baseline: &[Candle], candles_for: F) -> SymbolReport
    where
        F: FnMut(&str) -> Vec<Candle>,
    {
        let assessment = self.assess(baseline);
        self.run_with_assessment(symbol, assessment, candles_for)
    }

    /// Same as [`run_symbol`](Self::run_symbol) with a precomputed assessment.
    pub fn run_with_assessment<F>(
        &self,
        symbol: &str,
        assessment: RegimeAssessment,
        mut candles_for: F,
    ) -> SymbolReport
    where
        F: FnMut(&str) -> Vec<Candle>,
    {
        let mut report = SymbolReport::new(symbol, assessment);

        if let Some(veto) = self.volatility_veto(symbol, &report.assessment) {
            info!(
                symbol = %symbol,
                latest_atr = report.assessment.latest_atr,
                mean_atr = report.assessment.mean_atr,
                "SignalPipeline: skipping {} ({})",
                symbol,
                veto.reason
            );
            report.rejections.push(veto);
            return report;
        }

        let timeframes = report.assessment.timeframes.clone();
        debug!(
            symbol = %symbol,
            regime = %report.assessment.regime,
            timeframes = ?timeframes,
            "SignalPipeline: {} regime for {}, analyzing {}",
            report.assessment.regime,
            symbol,
            timeframes.join(", ")
        );

        for timeframe in &timeframes {
            let candles = candles_for(timeframe);
            let timeframe_report = self.evaluate_timeframe(symbol, timeframe, &candles);
            report.absorb(timeframe_report);
        }
        report
    }
}
