//! Hyperliquid REST market data

pub mod messages;
pub mod rest;

pub use messages::{CandleSnapshot, CandleSnapshotRequest, InfoRequest};
pub use rest::HyperliquidRestClient;
