//! Hyperliquid REST client for candle snapshots.
//!
//! HTTP 429 responses are retried with exponential backoff; other failures
//! surface immediately.

use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::Utc;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use super::messages::{CandleSnapshot, InfoRequest};
use crate::models::indicators::Candle;
use crate::services::market_data::{
    closed_candles, forward_fill, take_latest, timeframe_millis, MarketDataError,
    MarketDataProvider,
};

pub struct HyperliquidRestClient {
    base_url: String,
    http: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl HyperliquidRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(500))
                .with_max_delay(Duration::from_secs(8))
                .with_max_times(4),
        }
    }

    pub fn with_backoff(mut self, backoff: ExponentialBuilder) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Candles for `coin` between two millisecond timestamps, oldest first.
    pub async fn candle_snapshot(
        &self,
        coin: &str,
        interval: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let request = InfoRequest::candle_snapshot(coin, interval, start_time, end_time);

        let snapshots = (|| self.post_info(&request))
            .retry(self.backoff.clone())
            .when(MarketDataError::is_retryable)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    coin = %coin,
                    interval = %interval,
                    delay_ms = delay.as_millis() as u64,
                    "HyperliquidRestClient: {}, retrying in {:?}",
                    err,
                    delay
                );
            })
            .await?;

        let mut candles = snapshots
            .iter()
            .map(CandleSnapshot::to_candle)
            .collect::<Result<Vec<_>, _>>()?;
        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);

        debug!(
            coin = %coin,
            interval = %interval,
            count = candles.len(),
            "HyperliquidRestClient: fetched {} candles for {} {}",
            candles.len(),
            coin,
            interval
        );
        Ok(candles)
    }

    async fn post_info(&self, request: &InfoRequest) -> Result<Vec<CandleSnapshot>, MarketDataError> {
        let endpoint = Url::parse(&format!("{}/info", self.base_url.trim_end_matches('/')))?;
        let response = self.http.post(endpoint).json(request).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| MarketDataError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for HyperliquidRestClient {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let interval_ms = timeframe_millis(timeframe)
            .ok_or_else(|| MarketDataError::UnsupportedTimeframe(timeframe.to_string()))?;

        let now = Utc::now();
        let end_time = now.timestamp_millis();
        let start_time = end_time - interval_ms * limit as i64;

        let candles = self
            .candle_snapshot(symbol, timeframe, start_time, end_time)
            .await?;
        let closed = closed_candles(candles, now);
        Ok(take_latest(forward_fill(closed), limit))
    }
}
