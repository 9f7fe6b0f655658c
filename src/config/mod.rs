//! Runtime configuration.
//!
//! Everything the pipeline needs is carried by an explicit [`Config`] value.
//! Binaries build it from the environment (after loading `.env`); tests build
//! it from any key lookup.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

pub const DEFAULT_HYPERLIQUID_API_URL: &str = "https://api.hyperliquid.xyz";

/// Bars needed by the confluence engine's trend filter.
pub const MIN_CANDLE_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, reason: impl Display) -> Self {
        ConfigError::Invalid {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Deployment environment name (`production`, `sandbox`, ...).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

/// Account parameters used by the risk stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountConfig {
    pub balance: f64,
    pub risk_per_trade_pct: f64,
    pub max_leverage: u32,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            balance: 1000.0,
            risk_per_trade_pct: 1.0,
            max_leverage: 5,
        }
    }
}

/// Timeframe pair analyzed in each regime.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeTimeframes {
    /// ADX < 20
    pub ranging: Vec<String>,
    /// 20 <= ADX <= 25, and the short-history fallback
    pub transition: Vec<String>,
    /// ADX > 25
    pub trending: Vec<String>,
}

impl Default for RegimeTimeframes {
    fn default() -> Self {
        Self {
            ranging: vec!["1h".to_string(), "4h".to_string()],
            transition: vec!["15m".to_string(), "1h".to_string()],
            trending: vec!["5m".to_string(), "15m".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub account: AccountConfig,
    pub symbols: Vec<String>,
    pub baseline_timeframe: String,
    pub candle_limit: usize,
    pub timeframes: RegimeTimeframes,
    pub hyperliquid_api_url: String,
    pub notify_webhook_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: AccountConfig::default(),
            symbols: vec!["BTC".to_string(), "ETH".to_string(), "SOL".to_string()],
            baseline_timeframe: "5m".to_string(),
            candle_limit: 300,
            timeframes: RegimeTimeframes::default(),
            hyperliquid_api_url: DEFAULT_HYPERLIQUID_API_URL.to_string(),
            notify_webhook_url: None,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Missing keys fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let balance: f64 = parse_var(&lookup, "ACCOUNT_BALANCE", defaults.account.balance)?;
        if !(balance.is_finite() && balance > 0.0) {
            return Err(ConfigError::invalid(
                "ACCOUNT_BALANCE",
                balance.to_string(),
                "must be a positive number",
            ));
        }

        let risk_per_trade_pct: f64 = parse_var(
            &lookup,
            "RISK_PER_TRADE_PCT",
            defaults.account.risk_per_trade_pct,
        )?;
        if !(risk_per_trade_pct.is_finite() && risk_per_trade_pct > 0.0) {
            return Err(ConfigError::invalid(
                "RISK_PER_TRADE_PCT",
                risk_per_trade_pct.to_string(),
                "must be a positive number",
            ));
        }

        let max_leverage: u32 = parse_var(&lookup, "MAX_LEVERAGE", defaults.account.max_leverage)?;
        if max_leverage < 1 {
            return Err(ConfigError::invalid(
                "MAX_LEVERAGE",
                max_leverage.to_string(),
                "must be at least 1",
            ));
        }

        let symbols = parse_list(&lookup, "SYMBOLS", defaults.symbols)?;

        let baseline_timeframe = lookup("BASELINE_TIMEFRAME")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.baseline_timeframe);

        let candle_limit: usize = parse_var(&lookup, "CANDLE_LIMIT", defaults.candle_limit)?;
        if candle_limit < MIN_CANDLE_LIMIT {
            return Err(ConfigError::invalid(
                "CANDLE_LIMIT",
                candle_limit.to_string(),
                format!("must be at least {}", MIN_CANDLE_LIMIT),
            ));
        }

        let timeframes = RegimeTimeframes {
            ranging: parse_list(&lookup, "RANGING_TIMEFRAMES", defaults.timeframes.ranging)?,
            transition: parse_list(
                &lookup,
                "TRANSITION_TIMEFRAMES",
                defaults.timeframes.transition,
            )?,
            trending: parse_list(&lookup, "TRENDING_TIMEFRAMES", defaults.timeframes.trending)?,
        };

        let hyperliquid_api_url = match lookup("HYPERLIQUID_API_URL") {
            Some(raw) if !raw.trim().is_empty() => parse_url("HYPERLIQUID_API_URL", &raw)?,
            _ => defaults.hyperliquid_api_url,
        };

        let notify_webhook_url = match lookup("NOTIFY_WEBHOOK_URL") {
            Some(raw) if !raw.trim().is_empty() => Some(parse_url("NOTIFY_WEBHOOK_URL", &raw)?),
            _ => None,
        };

        Ok(Self {
            account: AccountConfig {
                balance,
                risk_per_trade_pct,
                max_leverage,
            },
            symbols,
            baseline_timeframe,
            candle_limit,
            timeframes,
            hyperliquid_api_url,
            notify_webhook_url,
        })
    }
}

fn parse_var<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid(key, raw.clone(), e)),
        _ => Ok(default),
    }
}

fn parse_list<F>(
    lookup: &F,
    key: &'static str,
    default: Vec<String>,
) -> Result<Vec<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let items: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(ConfigError::invalid(key, raw, "must list at least one entry"));
    }
    Ok(items)
}

fn parse_url(key: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::invalid(key, raw, e))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
