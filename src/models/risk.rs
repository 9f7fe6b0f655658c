use serde::{Deserialize, Serialize};
use std::fmt;

use super::signal::{Signal, SignalDirection};

/// Why the risk stage refused a candidate. Each variant carries the metric
/// that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskRejection {
    InvalidAccount { balance: f64 },
    InvalidEntry { entry: f64 },
    ZeroStopDistance,
    LevelsOnWrongSide { direction: SignalDirection },
    StopTooTight { stop_pct: f64 },
    StopTooWide { stop_pct: f64 },
    RiskRewardTooLow { ratio: f64 },
}

impl fmt::Display for RiskRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskRejection::InvalidAccount { balance } => {
                write!(f, "invalid account balance: {:.2}", balance)
            }
            RiskRejection::InvalidEntry { entry } => write!(f, "invalid entry price: {}", entry),
            RiskRejection::ZeroStopDistance => write!(f, "stop loss distance is zero"),
            RiskRejection::LevelsOnWrongSide { direction } => write!(
                f,
                "stop/target on the wrong side of entry for {}",
                direction
            ),
            RiskRejection::StopTooTight { stop_pct } => write!(
                f,
                "stop too tight (noise): {:.3}% of entry",
                stop_pct * 100.0
            ),
            RiskRejection::StopTooWide { stop_pct } => write!(
                f,
                "stop too wide (excessive volatility): {:.2}% of entry",
                stop_pct * 100.0
            ),
            RiskRejection::RiskRewardTooLow { ratio } => {
                write!(f, "R/R too low: {:.2} (minimum 2.00)", ratio)
            }
        }
    }
}

/// Outcome of the risk stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum RiskDecision {
    Approved(Signal),
    Rejected(RiskRejection),
}

impl RiskDecision {
    pub fn is_valid(&self) -> bool {
        matches!(self, RiskDecision::Approved(_))
    }

    pub fn reason(&self) -> Option<&RiskRejection> {
        match self {
            RiskDecision::Approved(_) => None,
            RiskDecision::Rejected(reason) => Some(reason),
        }
    }

    pub fn signal(&self) -> Option<&Signal> {
        match self {
            RiskDecision::Approved(signal) => Some(signal),
            RiskDecision::Rejected(_) => None,
        }
    }

    pub fn into_signal(self) -> Option<Signal> {
        match self {
            RiskDecision::Approved(signal) => Some(signal),
            RiskDecision::Rejected(_) => None,
        }
    }
}
