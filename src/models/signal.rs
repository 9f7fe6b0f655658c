use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
}

impl SignalDirection {
    /// +1 for long, -1 for short.
    pub fn sign(self) -> f64 {
        match self {
            SignalDirection::Long => 1.0,
            SignalDirection::Short => -1.0,
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Long => write!(f, "LONG"),
            SignalDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// Lifecycle status. The notifier's caller moves a signal out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStatus {
    Pending,
    Sent,
    Failed,
}

/// A directional trade candidate.
///
/// Created `Pending` by the confluence engine. The risk stage returns a new
/// value carrying `position_size` and `suggested_leverage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub symbol: String,
    pub timeframe: String,
    pub strategy: String,
    pub direction: SignalDirection,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub created_at: DateTime<Utc>,
    pub status: SignalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_leverage: Option<u32>,
}

impl Signal {
    /// Build a pending signal whose stop and target sit `stop_distance` and
    /// `target_distance` away from entry on the correct sides for `direction`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: &str,
        timeframe: &str,
        strategy: String,
        direction: SignalDirection,
        entry_price: f64,
        stop_distance: f64,
        target_distance: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let sign = direction.sign();
        Self {
            id: format!("{}-{}-{}", symbol, timeframe, created_at.timestamp_millis()),
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            strategy,
            direction,
            entry_price,
            stop_loss: entry_price - sign * stop_distance,
            take_profit: entry_price + sign * target_distance,
            created_at,
            status: SignalStatus::Pending,
            position_size: None,
            suggested_leverage: None,
        }
    }

    pub fn with_sizing(mut self, position_size: f64, suggested_leverage: u32) -> Self {
        self.position_size = Some(position_size);
        self.suggested_leverage = Some(suggested_leverage);
        self
    }

    pub fn with_status(mut self, status: SignalStatus) -> Self {
        self.status = status;
        self
    }

    /// Absolute distance between entry and stop.
    pub fn stop_distance(&self) -> f64 {
        (self.entry_price - self.stop_loss).abs()
    }

    /// Absolute distance between entry and target.
    pub fn target_distance(&self) -> f64 {
        (self.take_profit - self.entry_price).abs()
    }

    /// Whether stop and target sit on the correct sides of entry.
    pub fn has_consistent_levels(&self) -> bool {
        match self.direction {
            SignalDirection::Long => {
                self.stop_loss < self.entry_price && self.take_profit > self.entry_price
            }
            SignalDirection::Short => {
                self.stop_loss > self.entry_price && self.take_profit < self.entry_price
            }
        }
    }
}
