//! Hyperliquid `/info` request and response payloads

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::indicators::Candle;
use crate::services::market_data::MarketDataError;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    CandleSnapshot { req: CandleSnapshotRequest },
}

impl InfoRequest {
    pub fn candle_snapshot(coin: &str, interval: &str, start_time: i64, end_time: i64) -> Self {
        InfoRequest::CandleSnapshot {
            req: CandleSnapshotRequest {
                coin: coin.to_string(),
                interval: interval.to_string(),
                start_time,
                end_time,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleSnapshotRequest {
    pub coin: String,
    pub interval: String,
    pub start_time: i64,
    pub end_time: i64,
}

/// One bar of a `candleSnapshot` response. Prices and volume arrive as
/// decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleSnapshot {
    #[serde(rename = "t")]
    pub open_time: i64,
    #[serde(rename = "T")]
    pub close_time: i64,
    #[serde(rename = "s", default)]
    pub coin: String,
    #[serde(rename = "i", default)]
    pub interval: String,
    #[serde(rename = "o")]
    pub open: String,
    #[serde(rename = "h")]
    pub high: String,
    #[serde(rename = "l")]
    pub low: String,
    #[serde(rename = "c")]
    pub close: String,
    #[serde(rename = "v")]
    pub volume: String,
    #[serde(rename = "n", default)]
    pub trades: u64,
}

impl CandleSnapshot {
    /// Convert to a [`Candle`] stamped with the bar's close time.
    pub fn to_candle(&self) -> Result<Candle, MarketDataError> {
        let timestamp = DateTime::from_timestamp_millis(self.close_time).ok_or_else(|| {
            MarketDataError::Decode(format!("invalid close time {}", self.close_time))
        })?;

        Ok(Candle::new(
            parse_decimal("open", &self.open)?,
            parse_decimal("high", &self.high)?,
            parse_decimal("low", &self.low)?,
            parse_decimal("close", &self.close)?,
            parse_decimal("volume", &self.volume)?,
            timestamp,
        ))
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<f64, MarketDataError> {
    raw.parse::<f64>()
        .map_err(|e| MarketDataError::Decode(format!("invalid {} {:?}: {}", field, raw, e)))
}
