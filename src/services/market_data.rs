//! Market data provider interface.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::indicators::Candle;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limited by market data provider")]
    RateLimited,
    #[error("market data provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode candles: {0}")]
    Decode(String),
    #[error("invalid market data URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported timeframe: {0}")]
    UnsupportedTimeframe(String),
}

impl MarketDataError {
    /// Only rate limiting is worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, MarketDataError::RateLimited)
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest `limit` candles for `(symbol, timeframe)`, oldest first, with
    /// gaps forward-filled.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}

/// Replace bars with a missing close (non-finite or non-positive) by a flat
/// bar at the previous close, keeping timestamp and volume. Leading bars
/// without a usable close are dropped.
pub fn forward_fill(candles: Vec<Candle>) -> Vec<Candle> {
    let mut filled: Vec<Candle> = Vec::with_capacity(candles.len());
    for mut candle in candles {
        if !(candle.close.is_finite() && candle.close > 0.0) {
            let Some(prev) = filled.last() else {
                continue;
            };
            let close = prev.close;
            candle.open = close;
            candle.high = close;
            candle.low = close;
            candle.close = close;
        }
        filled.push(candle);
    }
    filled
}

/// Drop bars whose close time is still ahead of `now`.
pub fn closed_candles(mut candles: Vec<Candle>, now: DateTime<Utc>) -> Vec<Candle> {
    candles.retain(|c| c.timestamp <= now);
    candles
}

/// Keep the newest `limit` candles.
pub fn take_latest(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}

/// Length of a timeframe label such as `15m`, `1h` or `1d`, in milliseconds.
pub fn timeframe_millis(timeframe: &str) -> Option<i64> {
    let timeframe = timeframe.trim();
    let split = timeframe.find(|c: char| !c.is_ascii_digit())?;
    let (count, unit) = timeframe.split_at(split);
    let count: i64 = count.parse().ok()?;
    if count == 0 {
        return None;
    }

    let unit_ms = match unit {
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        "w" => 604_800_000,
        _ => return None,
    };
    Some(count * unit_ms)
}

/// Fixture-backed provider keyed by `(symbol, timeframe)`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMarketData {
    series: HashMap<(String, String), Vec<Candle>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: &str, timeframe: &str, candles: Vec<Candle>) -> Self {
        self.insert(symbol, timeframe, candles);
        self
    }

    pub fn insert(&mut self, symbol: &str, timeframe: &str, candles: Vec<Candle>) {
        self.series
            .insert((symbol.to_string(), timeframe.to_string()), candles);
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryMarketData {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let candles = self
            .series
            .get(&(symbol.to_string(), timeframe.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(take_latest(forward_fill(candles), limit))
    }
}
