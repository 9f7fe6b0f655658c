//! Prometheus counters for scan outcomes

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::models::signal::SignalStatus;
use crate::signals::rejection::Rejection;

pub struct Metrics {
    pub registry: Registry,
    pub scans_total: IntCounter,
    pub signals_confirmed_total: IntCounter,
    pub rejections_total: IntCounterVec,
    pub notifications_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("perpscan_scans_total", "Symbols scanned")?;
        let signals_confirmed_total = IntCounter::new(
            "perpscan_signals_confirmed_total",
            "Signals that passed confluence and risk validation",
        )?;
        let rejections_total = IntCounterVec::new(
            Opts::new("perpscan_rejections_total", "Rejected candidates by stage"),
            &["stage"],
        )?;
        let notifications_total = IntCounterVec::new(
            Opts::new("perpscan_notifications_total", "Notification outcomes"),
            &["status"],
        )?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(signals_confirmed_total.clone()))?;
        registry.register(Box::new(rejections_total.clone()))?;
        registry.register(Box::new(notifications_total.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            signals_confirmed_total,
            rejections_total,
            notifications_total,
        })
    }

    pub fn record_rejection(&self, rejection: &Rejection) {
        self.rejections_total
            .with_label_values(&[rejection.stage().as_str()])
            .inc();
    }

    pub fn record_notification(&self, status: SignalStatus) {
        let label = match status {
            SignalStatus::Pending => "pending",
            SignalStatus::Sent => "sent",
            SignalStatus::Failed => "failed",
        };
        self.notifications_total.with_label_values(&[label]).inc();
    }

    /// Text exposition format of every registered metric.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
