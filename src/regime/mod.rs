//! Regime classification and volatility veto.

pub mod classifier;

pub use classifier::*;
