//! Signal notification sinks.
//!
//! The pipeline never calls a notifier itself; the scanner hands each
//! confirmed signal over and records `SENT` or `FAILED` from the result.

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::models::signal::Signal;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("webhook responded with status {0}")]
    Status(u16),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, signal: &Signal) -> Result<(), NotifierError>;
}

/// Human-readable alert text for a sized signal.
pub fn format_signal_message(signal: &Signal) -> String {
    let mut lines = vec![
        format!("{} {} ({})", signal.direction, signal.symbol, signal.timeframe),
        format!("Strategy: {}", signal.strategy),
        format!("Entry: {:.4}", signal.entry_price),
        format!("Stop loss: {:.4}", signal.stop_loss),
        format!("Take profit: {:.4}", signal.take_profit),
    ];
    if let (Some(size), Some(leverage)) = (signal.position_size, signal.suggested_leverage) {
        lines.push(format!("Size: {:.6} @ {}x", size, leverage));
    }
    lines.join("\n")
}

/// Writes signals to the log. Used when no webhook is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, signal: &Signal) -> Result<(), NotifierError> {
        info!(
            signal_id = %signal.id,
            symbol = %signal.symbol,
            timeframe = %signal.timeframe,
            direction = %signal.direction,
            "Signal: {}",
            format_signal_message(signal).replace('\n', " | ")
        );
        Ok(())
    }
}

/// POSTs `{ "text": <message>, "signal": <signal> }` to a chat webhook.
pub struct WebhookNotifier {
    url: String,
    http: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, signal: &Signal) -> Result<(), NotifierError> {
        let payload = json!({
            "text": format_signal_message(signal),
            "signal": signal,
        });

        let response = self.http.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::Status(status.as_u16()));
        }
        Ok(())
    }
}
