//! One-shot scan across the configured symbols.
//!
//! Fetches candles through a [`MarketDataProvider`], runs the
//! [`SignalPipeline`] for each symbol concurrently and hands confirmed
//! signals to a [`Notifier`].

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::pipeline::{SignalPipeline, SymbolReport};
use crate::metrics::Metrics;
use crate::models::indicators::Candle;
use crate::models::signal::{Signal, SignalStatus};
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::Notifier;
use crate::signals::rejection::Rejection;

/// Result of one scan, in the configured symbol order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub symbols: Vec<SymbolReport>,
}

impl ScanReport {
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.symbols.iter().flat_map(|report| report.confirmed.iter())
    }

    pub fn rejections(&self) -> impl Iterator<Item = &Rejection> {
        self.symbols.iter().flat_map(|report| report.rejections.iter())
    }

    pub fn signal_count(&self) -> usize {
        self.signals().count()
    }

    pub fn sent_count(&self) -> usize {
        self.signals()
            .filter(|signal| signal.status == SignalStatus::Sent)
            .count()
    }

    pub fn symbol(&self, symbol: &str) -> Option<&SymbolReport> {
        self.symbols.iter().find(|report| report.symbol == symbol)
    }
}

pub struct Scanner {
    config: Config,
    pipeline: SignalPipeline,
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn Notifier>,
    metrics: Option<Arc<Metrics>>,
}

impl Scanner {
    pub fn new(
        config: Config,
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let pipeline = SignalPipeline::new(&config);
        Self {
            config,
            pipeline,
            provider,
            notifier,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan every configured symbol once.
    pub async fn scan(&self) -> ScanReport {
        info!(
            symbols = self.config.symbols.len(),
            "Scanner: scanning {}",
            self.config.symbols.join(", ")
        );

        let symbols = join_all(
            self.config
                .symbols
                .iter()
                .map(|symbol| self.scan_symbol(symbol)),
        )
        .await;

        let report = ScanReport { symbols };
        info!(
            signals = report.signal_count(),
            sent = report.sent_count(),
            "Scanner: scan complete, {} signal(s), {} sent",
            report.signal_count(),
            report.sent_count()
        );
        report
    }

    /// Fetch, evaluate and notify for one symbol.
    pub async fn scan_symbol(&self, symbol: &str) -> SymbolReport {
        let baseline_timeframe = self.pipeline.baseline_timeframe().to_string();
        let baseline = self.load_candles(symbol, &baseline_timeframe).await;
        let assessment = self.pipeline.assess(&baseline);

        let mut series: HashMap<String, Vec<Candle>> = HashMap::new();
        if !assessment.is_volatile {
            for timeframe in &assessment.timeframes {
                if series.contains_key(timeframe) {
                    continue;
                }
                let candles = if *timeframe == baseline_timeframe {
                    baseline.clone()
                } else {
                    self.load_candles(symbol, timeframe).await
                };
                series.insert(timeframe.clone(), candles);
            }
        }

        let mut report = self.pipeline.run_with_assessment(symbol, assessment, |timeframe| {
            series.get(timeframe).cloned().unwrap_or_default()
        });

        let mut dispatched = Vec::with_capacity(report.confirmed.len());
        for signal in report.confirmed.drain(..) {
            dispatched.push(self.dispatch(signal).await);
        }
        report.confirmed = dispatched;

        if let Some(metrics) = &self.metrics {
            metrics.scans_total.inc();
            metrics
                .signals_confirmed_total
                .inc_by(report.confirmed.len() as u64);
            for rejection in &report.rejections {
                metrics.record_rejection(rejection);
            }
            for signal in &report.confirmed {
                metrics.record_notification(signal.status);
            }
        }

        for rejection in &report.rejections {
            debug!(
                symbol = %symbol,
                stage = rejection.stage().as_str(),
                "Scanner: {}",
                rejection
            );
        }
        report
    }

    /// Hand a confirmed signal to the notifier and record the outcome.
    pub async fn dispatch(&self, signal: Signal) -> Signal {
        match self.notifier.notify(&signal).await {
            Ok(()) => {
                info!(
                    symbol = %signal.symbol,
                    timeframe = %signal.timeframe,
                    direction = %signal.direction,
                    "Scanner: sent {} {} {}",
                    signal.direction,
                    signal.symbol,
                    signal.timeframe
                );
                signal.with_status(SignalStatus::Sent)
            }
            Err(e) => {
                warn!(
                    symbol = %signal.symbol,
                    timeframe = %signal.timeframe,
                    error = %e,
                    "Scanner: failed to notify {}: {}",
                    signal.id,
                    e
                );
                signal.with_status(SignalStatus::Failed)
            }
        }
    }

    async fn load_candles(&self, symbol: &str, timeframe: &str) -> Vec<Candle> {
        match self
            .provider
            .get_candles(symbol, timeframe, self.config.candle_limit)
            .await
        {
            Ok(candles) => {
                debug!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    count = candles.len(),
                    "Scanner: loaded {} candles for {} {}",
                    candles.len(),
                    symbol,
                    timeframe
                );
                candles
            }
            Err(e) => {
                warn!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    error = %e,
                    "Scanner: market data unavailable for {} {}: {}",
                    symbol,
                    timeframe,
                    e
                );
                Vec::new()
            }
        }
    }
}
