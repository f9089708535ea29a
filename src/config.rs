use crate::error::{AppError, Result};

pub const FEED_URL: &str = "http://localhost:8000/data/whales.json";

/// Seconds between scheduled refresh cycles.
pub const REFRESH_INTERVAL_SECS: u64 = 30;

/// Minimum absolute trade size (USD) a trade must meet to survive the
/// significance filter.
pub const MIN_TRADE_USD: f64 = 1000.0;

/// Feed request timeout (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Tier size thresholds (absolute USD). The classifier walks these
/// highest-first, so they must stay strictly descending.
pub mod tier_thresholds {
    pub const BLUE_WHALE_MIN: f64 = 50_000.0;
    pub const WHALE_MIN: f64 = 10_000.0;
    pub const SHARK_MIN: f64 = 5_000.0;
    pub const DOLPHIN_MIN: f64 = 1_000.0;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub log_level: String,
    /// Seconds between refresh cycles (REFRESH_INTERVAL_SECS).
    pub refresh_interval_secs: u64,
    /// Minimum absolute trade size in USD (MIN_TRADE_USD).
    pub min_trade_usd: f64,
    /// Amounts below DOLPHIN_MIN classify into the MINNOW floor tier instead
    /// of being skipped (INCLUDE_MINNOW).
    pub include_minnow: bool,
    /// Feed request timeout in seconds (FETCH_TIMEOUT_SECS).
    pub fetch_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            feed_url: std::env::var("FEED_URL").unwrap_or_else(|_| FEED_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            refresh_interval_secs: std::env::var("REFRESH_INTERVAL_SECS")
                .unwrap_or_else(|_| REFRESH_INTERVAL_SECS.to_string())
                .parse::<u64>()
                .map_err(|_| {
                    AppError::Config(
                        "REFRESH_INTERVAL_SECS must be a whole number of seconds".to_string(),
                    )
                })?,
            min_trade_usd: std::env::var("MIN_TRADE_USD")
                .unwrap_or_else(|_| MIN_TRADE_USD.to_string())
                .parse::<f64>()
                .unwrap_or(MIN_TRADE_USD),
            include_minnow: std::env::var("INCLUDE_MINNOW")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
            fetch_timeout_secs: std::env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| FETCH_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .unwrap_or(FETCH_TIMEOUT_SECS),
        })
    }
}
