//! Directional votes and the confluence tally

use serde::{Deserialize, Serialize};

use crate::models::signal::SignalDirection;

/// Independent votes a direction needs before it may become a signal.
pub const MIN_CONFLUENCE_VOTES: usize = 2;

/// Indicator casting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteSource {
    EmaCross,
    Rsi,
    Bollinger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub source: VoteSource,
    pub direction: SignalDirection,
}

impl Vote {
    pub fn new(source: VoteSource, direction: SignalDirection) -> Self {
        Self { source, direction }
    }

    /// Fragment used in the strategy label.
    pub fn label(&self) -> &'static str {
        match (self.source, self.direction) {
            (VoteSource::EmaCross, SignalDirection::Long) => "EMA 9/21 bullish cross",
            (VoteSource::EmaCross, SignalDirection::Short) => "EMA 9/21 bearish cross",
            (VoteSource::Rsi, SignalDirection::Long) => "RSI oversold",
            (VoteSource::Rsi, SignalDirection::Short) => "RSI overbought",
            (VoteSource::Bollinger, SignalDirection::Long) => "Bollinger lower band re-entry",
            (VoteSource::Bollinger, SignalDirection::Short) => "Bollinger upper band re-entry",
        }
    }
}

/// Result of partitioning votes by direction.
#[derive(Debug, Clone, PartialEq)]
pub enum Tally {
    /// One direction reached the confluence threshold.
    Confluence {
        direction: SignalDirection,
        votes: Vec<Vote>,
    },
    NoVotes,
    /// Neither direction reached the threshold.
    LowConfluence { long_votes: usize, short_votes: usize },
    /// Both directions reached the threshold. Resolved as no signal.
    Conflict { long_votes: usize, short_votes: usize },
}

/// Partition votes into long and short and apply the confluence rule.
pub fn tally_votes(votes: &[Vote]) -> Tally {
    let (long, short): (Vec<Vote>, Vec<Vote>) = votes
        .iter()
        .copied()
        .partition(|v| v.direction == SignalDirection::Long);

    let long_votes = long.len();
    let short_votes = short.len();

    match (
        long_votes >= MIN_CONFLUENCE_VOTES,
        short_votes >= MIN_CONFLUENCE_VOTES,
    ) {
        (true, true) => Tally::Conflict {
            long_votes,
            short_votes,
        },
        (true, false) => Tally::Confluence {
            direction: SignalDirection::Long,
            votes: long,
        },
        (false, true) => Tally::Confluence {
            direction: SignalDirection::Short,
            votes: short,
        },
        (false, false) if long_votes + short_votes == 0 => Tally::NoVotes,
        (false, false) => Tally::LowConfluence {
            long_votes,
            short_votes,
        },
    }
}

/// Strategy label listing the contributing votes.
pub fn strategy_label(votes: &[Vote]) -> String {
    votes
        .iter()
        .map(Vote::label)
        .collect::<Vec<_>>()
        .join(" + ")
}
