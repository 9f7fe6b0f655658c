//! Risk-based position sizing under a leverage cap

use crate::common::math;

/// Hard ceiling on the configured risk per trade, in percent.
pub const MAX_RISK_PER_TRADE_PCT: f64 = 5.0;
/// Decimal places kept on the position size.
pub const POSITION_SIZE_DECIMALS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSizing {
    pub effective_risk_pct: f64,
    pub risk_amount: f64,
    /// Asset units, rounded to six decimals.
    pub position_size: f64,
    pub leverage: u32,
    /// Whether the leverage cap shrank the position.
    pub clamped: bool,
}

/// Size a position so that hitting the stop loses `risk_pct` of `balance`.
///
/// Required leverage is rounded up; when it exceeds `max_leverage` the
/// leverage is pinned to the cap and the size shrinks to
/// `balance * max_leverage / entry`, floored to six decimals. Leverage never
/// drops below 1.
///
/// Callers guarantee a positive balance, entry and stop distance.
pub fn size_position(
    balance: f64,
    risk_pct: f64,
    max_leverage: u32,
    entry: f64,
    stop_distance: f64,
) -> PositionSizing {
    let effective_risk_pct = risk_pct.min(MAX_RISK_PER_TRADE_PCT);
    let risk_amount = balance * effective_risk_pct / 100.0;
    let mut position_size = risk_amount / stop_distance;

    let required_leverage = ((position_size * entry) / balance).ceil();
    let max_leverage = max_leverage.max(1);

    let (leverage, clamped) = if required_leverage > max_leverage as f64 {
        position_size = math::floor_to(
            (balance * max_leverage as f64) / entry,
            POSITION_SIZE_DECIMALS,
        );
        (max_leverage, true)
    } else {
        position_size = math::round_to(position_size, POSITION_SIZE_DECIMALS);
        (required_leverage.max(1.0) as u32, false)
    };

    PositionSizing {
        effective_risk_pct,
        risk_amount,
        position_size,
        leverage,
        clamped,
    }
}
