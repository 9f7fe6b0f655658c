//! Perpscan Scanner
//!
//! Runs one scan over the configured symbols and prints the confirmed
//! signals. Scheduling is left to whatever invokes the binary.

use dotenvy::dotenv;
use perpscan::config::Config;
use perpscan::core::runtime::Scanner;
use perpscan::logging;
use perpscan::metrics::Metrics;
use perpscan::services::{
    format_signal_message, HyperliquidRestClient, LogNotifier, MarketDataProvider, Notifier,
    WebhookNotifier,
};
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = perpscan::config::get_environment();
    info!("Starting Perpscan Scanner");
    info!(environment = %env, "Environment");

    let config = Config::from_env()?;
    let metrics = Arc::new(Metrics::new()?);

    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(HyperliquidRestClient::new(config.hyperliquid_api_url.clone()));
    let notifier: Arc<dyn Notifier> = match &config.notify_webhook_url {
        Some(url) => {
            info!(url = %url, "Notifying via webhook");
            Arc::new(WebhookNotifier::new(url.clone()))
        }
        None => {
            info!("NOTIFY_WEBHOOK_URL not set, signals will be logged");
            Arc::new(LogNotifier)
        }
    };

    let scanner = Scanner::new(config, provider, notifier).with_metrics(metrics.clone());
    let report = scanner.scan().await;

    for symbol in &report.symbols {
        println!(
            "{}: {} regime (ADX {:.2}) -> {}",
            symbol.symbol,
            symbol.assessment.regime,
            symbol.assessment.adx,
            symbol.assessment.timeframes.join(", ")
        );
        for signal in &symbol.confirmed {
            println!("{}\nStatus: {:?}\n", format_signal_message(signal), signal.status);
        }
        for rejection in &symbol.rejections {
            println!("  {}", rejection);
        }
    }
    println!(
        "{} signal(s) confirmed, {} sent",
        report.signal_count(),
        report.sent_count()
    );

    debug!("Metrics:\n{}", metrics.export()?);
    Ok(())
}
