//! Trend indicators: SMA, EMA, ADX

pub mod adx;
pub mod ema;
pub mod sma;

pub use adx::*;
pub use ema::*;
pub use sma::*;
