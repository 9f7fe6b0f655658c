//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod regime;
pub mod risk;
pub mod signal;

pub use indicators::{AdxSeries, BollingerBands, Candle};
pub use regime::{Regime, RegimeAssessment};
pub use risk::{RiskDecision, RiskRejection};
pub use signal::{Signal, SignalDirection, SignalStatus};
