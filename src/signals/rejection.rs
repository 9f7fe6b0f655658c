//! Typed rejection log.
//!
//! Rejections are outcomes, not faults: every stage records why a
//! (symbol, timeframe) pair was dropped and the scan moves on.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::risk::RiskRejection;
use crate::models::signal::SignalDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionStage {
    Regime,
    Confluence,
    Risk,
}

impl RejectionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionStage::Regime => "regime",
            RejectionStage::Confluence => "confluence",
            RejectionStage::Risk => "risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    InsufficientHistory {
        bars: usize,
        required: usize,
    },
    VolatilityAnomaly {
        latest_atr: f64,
        mean_atr: f64,
    },
    NoVotes,
    LowConfluence {
        long_votes: usize,
        short_votes: usize,
    },
    ConflictingVotes {
        long_votes: usize,
        short_votes: usize,
    },
    TrendMismatch {
        direction: SignalDirection,
        price: f64,
        trend_sma: f64,
    },
    VolumeUnconfirmed {
        volume: f64,
        average: f64,
    },
    Risk {
        rejection: RiskRejection,
    },
}

impl RejectionReason {
    pub fn stage(&self) -> RejectionStage {
        match self {
            RejectionReason::VolatilityAnomaly { .. } => RejectionStage::Regime,
            RejectionReason::Risk { .. } => RejectionStage::Risk,
            _ => RejectionStage::Confluence,
        }
    }
}

impl From<RiskRejection> for RejectionReason {
    fn from(rejection: RiskRejection) -> Self {
        RejectionReason::Risk { rejection }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::InsufficientHistory { bars, required } => write!(
                f,
                "insufficient history: {} bars < {} required",
                bars, required
            ),
            RejectionReason::VolatilityAnomaly {
                latest_atr,
                mean_atr,
            } => write!(
                f,
                "volatility anomaly: ATR {:.4} > 1.8x trailing mean {:.4}",
                latest_atr, mean_atr
            ),
            RejectionReason::NoVotes => write!(f, "no directional indicator votes"),
            RejectionReason::LowConfluence {
                long_votes,
                short_votes,
            } => write!(
                f,
                "low confluence: {} long / {} short votes, 2 required",
                long_votes, short_votes
            ),
            RejectionReason::ConflictingVotes {
                long_votes,
                short_votes,
            } => write!(
                f,
                "conflicting confluence: {} long / {} short votes",
                long_votes, short_votes
            ),
            RejectionReason::TrendMismatch {
                direction,
                price,
                trend_sma,
            } => write!(
                f,
                "trend mismatch: {} with price {:.4} {} SMA200 {:.4}",
                direction,
                price,
                if price > trend_sma { "above" } else { "at/below" },
                trend_sma
            ),
            RejectionReason::VolumeUnconfirmed { volume, average } => write!(
                f,
                "volume unconfirmed: {:.2} <= 20-bar average {:.2}",
                volume, average
            ),
            RejectionReason::Risk { rejection } => write!(f, "risk: {}", rejection),
        }
    }
}

/// One entry of the explainability log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub symbol: String,
    pub timeframe: String,
    pub reason: RejectionReason,
}

impl Rejection {
    pub fn new(symbol: &str, timeframe: &str, reason: impl Into<RejectionReason>) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe: timeframe.to_string(),
            reason: reason.into(),
        }
    }

    pub fn stage(&self) -> RejectionStage {
        self.reason.stage()
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} {}] {}", self.symbol, self.timeframe, self.reason)
    }
}
