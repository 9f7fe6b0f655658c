//! Risk gate for confluence candidates.
//!
//! Checks run in order and the first failure wins:
//! 1. account balance and entry must be positive
//! 2. stop distance must be non-zero
//! 3. stop and target must sit on the correct sides of entry
//! 4. stop distance must be within (0.1%, 10%] of entry
//! 5. reward/risk must be at least 2.0

use tracing::{debug, info};

use crate::config::AccountConfig;
use crate::models::risk::{RiskDecision, RiskRejection};
use crate::models::signal::Signal;
use crate::risk::sizing::size_position;

pub const MIN_STOP_PCT: f64 = 0.001;
pub const MAX_STOP_PCT: f64 = 0.10;
pub const MIN_REWARD_RISK: f64 = 2.0;
/// Absorbs float error when the target is built as an exact multiple of
/// the stop distance.
const RATIO_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct RiskValidator {
    account: AccountConfig,
}

impl RiskValidator {
    pub fn new(account: AccountConfig) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &AccountConfig {
        &self.account
    }

    /// Validate a candidate and, when it passes, return it sized.
    pub fn validate(&self, signal: &Signal) -> RiskDecision {
        match self.check(signal) {
            Ok(()) => {
                let sizing = size_position(
                    self.account.balance,
                    self.account.risk_per_trade_pct,
                    self.account.max_leverage,
                    signal.entry_price,
                    signal.stop_distance(),
                );
                info!(
                    symbol = %signal.symbol,
                    timeframe = %signal.timeframe,
                    position_size = sizing.position_size,
                    leverage = sizing.leverage,
                    clamped = sizing.clamped,
                    "RiskValidator: approved {} {} size {} at {}x",
                    signal.symbol,
                    signal.timeframe,
                    sizing.position_size,
                    sizing.leverage
                );
                RiskDecision::Approved(
                    signal
                        .clone()
                        .with_sizing(sizing.position_size, sizing.leverage),
                )
            }
            Err(rejection) => {
                debug!(
                    symbol = %signal.symbol,
                    timeframe = %signal.timeframe,
                    "RiskValidator: rejected {} {}: {}",
                    signal.symbol,
                    signal.timeframe,
                    rejection
                );
                RiskDecision::Rejected(rejection)
            }
        }
    }

    fn check(&self, signal: &Signal) -> Result<(), RiskRejection> {
        let balance = self.account.balance;
        if !(balance.is_finite() && balance > 0.0) {
            return Err(RiskRejection::InvalidAccount { balance });
        }

        let entry = signal.entry_price;
        if !(entry.is_finite() && entry > 0.0) {
            return Err(RiskRejection::InvalidEntry { entry });
        }

        let stop_distance = signal.stop_distance();
        if stop_distance == 0.0 {
            return Err(RiskRejection::ZeroStopDistance);
        }

        if !signal.has_consistent_levels() {
            return Err(RiskRejection::LevelsOnWrongSide {
                direction: signal.direction,
            });
        }

        let stop_pct = stop_distance / entry;
        if stop_pct <= MIN_STOP_PCT {
            return Err(RiskRejection::StopTooTight { stop_pct });
        }
        if stop_pct > MAX_STOP_PCT {
            return Err(RiskRejection::StopTooWide { stop_pct });
        }

        let ratio = signal.target_distance() / stop_distance;
        if ratio + RATIO_TOLERANCE < MIN_REWARD_RISK {
            return Err(RiskRejection::RiskRewardTooLow { ratio });
        }

        Ok(())
    }
}
