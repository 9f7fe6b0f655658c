//! Volatility indicators: Bollinger Bands, ATR

pub mod atr;
pub mod bollinger;

pub use atr::*;
pub use bollinger::*;
