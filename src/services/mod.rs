//! External collaborators: market data in, notifications out.

pub mod hyperliquid;
pub mod market_data;
pub mod notifier;

pub use hyperliquid::HyperliquidRestClient;
pub use market_data::{forward_fill, InMemoryMarketData, MarketDataError, MarketDataProvider};
pub use notifier::{format_signal_message, LogNotifier, Notifier, NotifierError, WebhookNotifier};
