//! Unit tests for configuration loading

use std::collections::HashMap;

use perpscan::config::{Config, ConfigError, DEFAULT_HYPERLIQUID_API_URL};

fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

fn invalid_key(result: Result<Config, ConfigError>) -> &'static str {
    match result {
        Err(ConfigError::Invalid { key, .. }) => key,
        Ok(config) => panic!("expected an error, got {:?}", config),
    }
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.account.balance, 1000.0);
    assert_eq!(config.account.risk_per_trade_pct, 1.0);
    assert_eq!(config.account.max_leverage, 5);
    assert_eq!(config.symbols, vec!["BTC", "ETH", "SOL"]);
    assert_eq!(config.baseline_timeframe, "5m");
    assert_eq!(config.candle_limit, 300);
    assert_eq!(config.timeframes.ranging, vec!["1h", "4h"]);
    assert_eq!(config.timeframes.transition, vec!["15m", "1h"]);
    assert_eq!(config.timeframes.trending, vec!["5m", "15m"]);
    assert_eq!(config.hyperliquid_api_url, DEFAULT_HYPERLIQUID_API_URL);
    assert_eq!(config.notify_webhook_url, None);
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("ACCOUNT_BALANCE", "2500.5"),
        ("RISK_PER_TRADE_PCT", "0.5"),
        ("MAX_LEVERAGE", "10"),
        ("SYMBOLS", " BTC , DOGE ,"),
        ("BASELINE_TIMEFRAME", "15m"),
        ("CANDLE_LIMIT", "500"),
        ("TRENDING_TIMEFRAMES", "1m,5m"),
        ("HYPERLIQUID_API_URL", "http://localhost:8080/"),
        ("NOTIFY_WEBHOOK_URL", "https://hooks.example.com/signals"),
    ])
    .unwrap();

    assert_eq!(config.account.balance, 2500.5);
    assert_eq!(config.account.risk_per_trade_pct, 0.5);
    assert_eq!(config.account.max_leverage, 10);
    assert_eq!(config.symbols, vec!["BTC", "DOGE"]);
    assert_eq!(config.baseline_timeframe, "15m");
    assert_eq!(config.candle_limit, 500);
    assert_eq!(config.timeframes.trending, vec!["1m", "5m"]);
    assert_eq!(config.timeframes.ranging, vec!["1h", "4h"]);
    assert_eq!(config.hyperliquid_api_url, "http://localhost:8080");
    assert_eq!(
        config.notify_webhook_url.as_deref(),
        Some("https://hooks.example.com/signals")
    );
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = load(&[("ACCOUNT_BALANCE", " "), ("NOTIFY_WEBHOOK_URL", "")]).unwrap();
    assert_eq!(config.account.balance, 1000.0);
    assert_eq!(config.notify_webhook_url, None);
}

#[test]
fn test_invalid_values() {
    assert_eq!(invalid_key(load(&[("ACCOUNT_BALANCE", "-5")])), "ACCOUNT_BALANCE");
    assert_eq!(invalid_key(load(&[("ACCOUNT_BALANCE", "lots")])), "ACCOUNT_BALANCE");
    assert_eq!(invalid_key(load(&[("RISK_PER_TRADE_PCT", "0")])), "RISK_PER_TRADE_PCT");
    assert_eq!(invalid_key(load(&[("MAX_LEVERAGE", "0")])), "MAX_LEVERAGE");
    assert_eq!(invalid_key(load(&[("MAX_LEVERAGE", "2.5")])), "MAX_LEVERAGE");
    assert_eq!(invalid_key(load(&[("SYMBOLS", " , ")])), "SYMBOLS");
    assert_eq!(invalid_key(load(&[("CANDLE_LIMIT", "100")])), "CANDLE_LIMIT");
    assert_eq!(invalid_key(load(&[("RANGING_TIMEFRAMES", ",")])), "RANGING_TIMEFRAMES");
    assert_eq!(
        invalid_key(load(&[("NOTIFY_WEBHOOK_URL", "not a url")])),
        "NOTIFY_WEBHOOK_URL"
    );
}

#[test]
fn test_error_message_names_key() {
    let err = load(&[("CANDLE_LIMIT", "50")]).unwrap_err();
    assert!(err.to_string().contains("CANDLE_LIMIT"));
    assert!(err.to_string().contains("at least 200"));
}
