#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use backon::ExponentialBuilder;
use perpscan::models::indicators::Candle;
use perpscan::models::signal::Signal;
use perpscan::services::market_data::{MarketDataError, MarketDataProvider};
use perpscan::services::notifier::{Notifier, NotifierError};
use serde_json::{json, Value};

/// Backoff short enough to keep retry tests fast.
pub fn fast_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(1))
        .with_max_delay(Duration::from_millis(5))
        .with_max_times(3)
}

/// One `candleSnapshot` entry with string-encoded prices.
pub fn snapshot_entry(close_time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Value {
    json!({
        "t": close_time - 299_999,
        "T": close_time,
        "s": "BTC",
        "i": "5m",
        "o": open.to_string(),
        "h": high.to_string(),
        "l": low.to_string(),
        "c": close.to_string(),
        "v": volume.to_string(),
        "n": 42
    })
}

/// Notifier that records every signal it is handed.
#[derive(Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<Signal>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Signal> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, signal: &Signal) -> Result<(), NotifierError> {
        self.sent.lock().unwrap().push(signal.clone());
        if self.fail {
            Err(NotifierError::Status(503))
        } else {
            Ok(())
        }
    }
}

/// Provider whose every request fails.
pub struct UnavailableMarketData;

#[async_trait]
impl MarketDataProvider for UnavailableMarketData {
    async fn get_candles(
        &self,
        _symbol: &str,
        _timeframe: &str,
        _limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        Err(MarketDataError::Status {
            status: 503,
            body: "maintenance".to_string(),
        })
    }
}
