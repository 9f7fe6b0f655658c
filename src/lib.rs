//! Perpscan: regime-aware confluence signals for perpetual futures.
//!
//! Raw OHLCV history flows through four pure stages:
//! - `indicators`: SMA, EMA, RSI, Bollinger Bands, ATR, ADX series
//! - `regime`: ADX/ATR regime classification and volatility veto
//! - `signals`: multi-indicator confluence voting
//! - `risk`: stop/target validation and position sizing
//!
//! `core` wires the stages into a per-symbol pipeline and an async scanner;
//! `services` holds the market-data and notification collaborators.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod regime;
pub mod risk;
pub mod services;
pub mod signals;
