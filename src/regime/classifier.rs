//! ADX/ATR regime classifier.
//!
//! Picks the timeframe pair to analyze from the latest ADX of a baseline
//! series and flags symbols whose latest ATR spikes above its recent mean.

use tracing::debug;

use crate::common::math;
use crate::config::RegimeTimeframes;
use crate::indicators::{calculate_adx, calculate_atr};
use crate::models::indicators::Candle;
use crate::models::regime::{Regime, RegimeAssessment};

/// Bars required before the classifier trusts its indicators.
pub const MIN_REGIME_CANDLES: usize = 50;
pub const REGIME_PERIOD: usize = 14;
/// ATR values averaged for the volatility baseline (latest included).
pub const ATR_LOOKBACK: usize = 20;
pub const VOLATILITY_SPIKE_MULTIPLIER: f64 = 1.8;
pub const RANGING_ADX_MAX: f64 = 20.0;
pub const TRENDING_ADX_MIN: f64 = 25.0;

#[derive(Debug, Clone, Default)]
pub struct RegimeClassifier {
    timeframes: RegimeTimeframes,
}

impl RegimeClassifier {
    pub fn new(timeframes: RegimeTimeframes) -> Self {
        Self { timeframes }
    }

    pub fn timeframes(&self) -> &RegimeTimeframes {
        &self.timeframes
    }

    /// Classify a baseline candle series.
    ///
    /// Below [`MIN_REGIME_CANDLES`] bars this fails open: the transition pair
    /// is returned and the volatility veto is not raised.
    pub fn classify(&self, candles: &[Candle]) -> RegimeAssessment {
        if candles.len() < MIN_REGIME_CANDLES {
            debug!(
                count = candles.len(),
                min = MIN_REGIME_CANDLES,
                "RegimeClassifier: not enough candles ({} < {}), using default timeframes",
                candles.len(),
                MIN_REGIME_CANDLES
            );
            return RegimeAssessment {
                regime: Regime::Undetermined,
                adx: 0.0,
                latest_atr: 0.0,
                mean_atr: 0.0,
                is_volatile: false,
                timeframes: self.timeframes.transition.clone(),
            };
        }

        let atr = calculate_atr(candles, REGIME_PERIOD);
        let adx = calculate_adx(candles, REGIME_PERIOD).adx;

        let latest_atr = atr.last().copied().unwrap_or(0.0);
        let latest_adx = adx.last().copied().unwrap_or(0.0);
        let mean_atr = math::mean(&atr[atr.len() - ATR_LOOKBACK..]).unwrap_or(0.0);
        let is_volatile = is_volatility_spike(latest_atr, mean_atr);

        let regime = regime_for_adx(latest_adx);
        let timeframes = match regime {
            Regime::Ranging => self.timeframes.ranging.clone(),
            Regime::Trending => self.timeframes.trending.clone(),
            Regime::Transition | Regime::Undetermined => self.timeframes.transition.clone(),
        };

        debug!(
            adx = latest_adx,
            atr = latest_atr,
            mean_atr = mean_atr,
            regime = %regime,
            is_volatile = is_volatile,
            "RegimeClassifier: ADX {:.2} -> {} regime",
            latest_adx,
            regime
        );

        RegimeAssessment {
            regime,
            adx: latest_adx,
            latest_atr,
            mean_atr,
            is_volatile,
            timeframes,
        }
    }
}

/// Three-way regime split on ADX: below 20 ranging, above 25 trending,
/// otherwise transition.
pub fn regime_for_adx(adx: f64) -> Regime {
    if adx < RANGING_ADX_MAX {
        Regime::Ranging
    } else if adx > TRENDING_ADX_MIN {
        Regime::Trending
    } else {
        Regime::Transition
    }
}

/// Latest ATR more than 1.8x its trailing mean.
pub fn is_volatility_spike(latest_atr: f64, mean_atr: f64) -> bool {
    latest_atr > VOLATILITY_SPIKE_MULTIPLIER * mean_atr
}
