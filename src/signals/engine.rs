//! Multi-indicator confluence engine.
//!
//! Three indicators vote on the latest two bars of a timeframe. A direction
//! needs two agreeing votes, then must agree with the SMA200 trend and be
//! backed by above-average volume. Every dropped candidate is logged as a
//! [`Rejection`].

use tracing::{debug, info};

use crate::indicators::{
    calculate_atr, calculate_bollinger_bands, calculate_ema, calculate_rsi, calculate_sma,
    ema_cross_at,
};
use crate::models::indicators::{closes, volumes, Candle};
use crate::models::signal::{Signal, SignalDirection};
use crate::signals::rejection::{Rejection, RejectionReason};
use crate::signals::votes::{strategy_label, tally_votes, Tally, Vote, VoteSource};

pub const MIN_CANDLES: usize = 200;
pub const TREND_SMA_PERIOD: usize = 200;
pub const FAST_EMA_PERIOD: usize = 9;
pub const SLOW_EMA_PERIOD: usize = 21;
pub const RSI_PERIOD: usize = 14;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const VOLUME_SMA_PERIOD: usize = 20;
pub const ATR_PERIOD: usize = 14;
pub const STOP_ATR_MULTIPLIER: f64 = 2.0;
/// Target distance as a multiple of stop distance.
pub const REWARD_RISK_RATIO: f64 = 2.0;

/// Signals emitted for one (symbol, timeframe) plus the rejections collected
/// on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfluenceOutcome {
    pub signals: Vec<Signal>,
    pub rejections: Vec<Rejection>,
}

pub struct ConfluenceEngine;

impl ConfluenceEngine {
    /// Evaluate the latest bar of a timeframe. Emits at most one signal.
    pub fn evaluate(symbol: &str, timeframe: &str, candles: &[Candle]) -> ConfluenceOutcome {
        let mut outcome = ConfluenceOutcome::default();

        if candles.len() < MIN_CANDLES {
            Self::reject(
                &mut outcome,
                symbol,
                timeframe,
                RejectionReason::InsufficientHistory {
                    bars: candles.len(),
                    required: MIN_CANDLES,
                },
            );
            return outcome;
        }

        let closes = closes(candles);
        let last = candles.len() - 1;
        let votes = Self::collect_votes(&closes);

        let (direction, agreeing) = match tally_votes(&votes) {
            Tally::Confluence { direction, votes } => (direction, votes),
            Tally::NoVotes => {
                Self::reject(&mut outcome, symbol, timeframe, RejectionReason::NoVotes);
                return outcome;
            }
            Tally::LowConfluence {
                long_votes,
                short_votes,
            } => {
                Self::reject(
                    &mut outcome,
                    symbol,
                    timeframe,
                    RejectionReason::LowConfluence {
                        long_votes,
                        short_votes,
                    },
                );
                return outcome;
            }
            Tally::Conflict {
                long_votes,
                short_votes,
            } => {
                Self::reject(
                    &mut outcome,
                    symbol,
                    timeframe,
                    RejectionReason::ConflictingVotes {
                        long_votes,
                        short_votes,
                    },
                );
                return outcome;
            }
        };

        let price = closes[last];
        let trend_sma = calculate_sma(&closes, TREND_SMA_PERIOD)[last];
        let trend_aligned = match direction {
            SignalDirection::Long => price > trend_sma,
            SignalDirection::Short => price < trend_sma,
        };
        if !trend_aligned {
            Self::reject(
                &mut outcome,
                symbol,
                timeframe,
                RejectionReason::TrendMismatch {
                    direction,
                    price,
                    trend_sma,
                },
            );
            return outcome;
        }

        let volumes = volumes(candles);
        let volume = volumes[last];
        let average = calculate_sma(&volumes, VOLUME_SMA_PERIOD)[last];
        if volume <= average {
            Self::reject(
                &mut outcome,
                symbol,
                timeframe,
                RejectionReason::VolumeUnconfirmed { volume, average },
            );
            return outcome;
        }

        let atr = calculate_atr(candles, ATR_PERIOD)[last];
        let stop_distance = STOP_ATR_MULTIPLIER * atr;
        let target_distance = REWARD_RISK_RATIO * stop_distance;

        let signal = Signal::new(
            symbol,
            timeframe,
            strategy_label(&agreeing),
            direction,
            price,
            stop_distance,
            target_distance,
            candles[last].timestamp,
        );

        info!(
            symbol = %symbol,
            timeframe = %timeframe,
            direction = %direction,
            entry = signal.entry_price,
            stop_loss = signal.stop_loss,
            take_profit = signal.take_profit,
            "ConfluenceEngine: {} candidate for {} {} ({})",
            direction,
            symbol,
            timeframe,
            signal.strategy
        );

        outcome.signals.push(signal);
        outcome
    }

    /// Votes cast on the last two closes: EMA 9/21 cross, RSI 30/70 and
    /// Bollinger band re-entry.
    pub fn collect_votes(closes: &[f64]) -> Vec<Vote> {
        let mut votes = Vec::new();
        if closes.len() < 2 {
            return votes;
        }
        let last = closes.len() - 1;
        let prev = last - 1;

        let fast = calculate_ema(closes, FAST_EMA_PERIOD);
        let slow = calculate_ema(closes, SLOW_EMA_PERIOD);
        match ema_cross_at(&fast, &slow, last) {
            1 => votes.push(Vote::new(VoteSource::EmaCross, SignalDirection::Long)),
            -1 => votes.push(Vote::new(VoteSource::EmaCross, SignalDirection::Short)),
            _ => {}
        }

        let rsi = calculate_rsi(closes, RSI_PERIOD)[last];
        if rsi < RSI_OVERSOLD {
            votes.push(Vote::new(VoteSource::Rsi, SignalDirection::Long));
        } else if rsi > RSI_OVERBOUGHT {
            votes.push(Vote::new(VoteSource::Rsi, SignalDirection::Short));
        }

        let bands = calculate_bollinger_bands(closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
        if closes.len() >= BOLLINGER_PERIOD + 1 {
            if closes[prev] < bands.lower[prev] && closes[last] >= bands.lower[last] {
                votes.push(Vote::new(VoteSource::Bollinger, SignalDirection::Long));
            } else if closes[prev] > bands.upper[prev] && closes[last] <= bands.upper[last] {
                votes.push(Vote::new(VoteSource::Bollinger, SignalDirection::Short));
            }
        }

        votes
    }

    fn reject(
        outcome: &mut ConfluenceOutcome,
        symbol: &str,
        timeframe: &str,
        reason: RejectionReason,
    ) {
        let rejection = Rejection::new(symbol, timeframe, reason);
        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            stage = rejection.stage().as_str(),
            "ConfluenceEngine: {}",
            rejection
        );
        outcome.rejections.push(rejection);
    }
}
