use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{Outcome, Side, Trade};

#[derive(Debug, Default)]
pub struct FetchStats {
    /// Records the feed returned before any validation.
    pub feed_total: usize,
    pub parsed: usize,
    pub rejected_no_amount: usize,
    pub rejected_bad_outcome: usize,
    pub rejected_no_timestamp: usize,
    /// Sample of question strings from rejected records, for diagnostics.
    pub reject_samples: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// amountUSD missing or failed numeric parsing.
    NoAmount,
    /// outcomeIndex present but not 0 or 1.
    BadOutcome,
    NoTimestamp,
}

/// GET the whales feed and parse it into validated trades, skipping malformed
/// records rather than failing the batch. A cache-busting `t=<epoch millis>`
/// parameter is appended so intermediaries never serve a stale copy.
pub async fn fetch_trades(
    client: &reqwest::Client,
    cfg: &Config,
) -> Result<(Vec<Trade>, FetchStats)> {
    let url = cache_busted_url(&cfg.feed_url, now_millis());

    let resp = client.get(&url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(AppError::Status(status.as_u16()));
    }

    let body = resp.text().await?;
    let value: serde_json::Value = serde_json::from_str(&body)?;

    let items = value
        .as_array()
        .ok_or_else(|| AppError::Schema("feed response was not an array".to_string()))?;

    Ok(parse_feed_batch(items))
}

/// Validate a raw feed array record by record. Malformed records are counted
/// and dropped; they never abort the batch.
pub(crate) fn parse_feed_batch(items: &[serde_json::Value]) -> (Vec<Trade>, FetchStats) {
    let mut trades = Vec::with_capacity(items.len());
    let mut stats = FetchStats {
        feed_total: items.len(),
        ..FetchStats::default()
    };

    for item in items {
        match parse_feed_trade(item) {
            Ok(trade) => trades.push(trade),
            Err(rejection) => {
                match rejection {
                    Rejection::NoAmount => stats.rejected_no_amount += 1,
                    Rejection::BadOutcome => stats.rejected_bad_outcome += 1,
                    Rejection::NoTimestamp => stats.rejected_no_timestamp += 1,
                }
                if stats.reject_samples.len() < 5 {
                    let q = item
                        .get("market")
                        .and_then(|m| m.get("question"))
                        .or_else(|| item.get("question"))
                        .and_then(|q| q.as_str())
                        .unwrap_or("?");
                    stats.reject_samples.push(q.to_string());
                }
                debug!("skipping malformed feed record ({rejection:?})");
            }
        }
    }

    stats.parsed = trades.len();
    (trades, stats)
}

/// Parse one feed record. The upstream producers disagree on field names
/// (`amountUSD` vs `size_usd`, `timestamp` vs `time`, nested vs flat question),
/// so each field is resolved through the known aliases before rejecting.
fn parse_feed_trade(v: &serde_json::Value) -> std::result::Result<Trade, Rejection> {
    let amount_usd = ["amountUSD", "size_usd", "amount_usd"]
        .iter()
        .find_map(|k| v.get(k))
        .and_then(value_as_f64)
        .ok_or(Rejection::NoAmount)?;

    let outcome = ["outcomeIndex", "outcome"]
        .iter()
        .find_map(|k| v.get(k))
        .and_then(value_as_i64)
        .ok_or(Rejection::BadOutcome)
        .and_then(|idx| match idx {
            0 => Ok(Outcome::Yes),
            1 => Ok(Outcome::No),
            _ => Err(Rejection::BadOutcome),
        })?;

    let timestamp = ["timestamp", "time"]
        .iter()
        .find_map(|k| v.get(k))
        .and_then(value_as_i64)
        .ok_or(Rejection::NoTimestamp)?;

    let question = v
        .get("market")
        .and_then(|m| m.get("question"))
        .or_else(|| v.get("question"))
        .or_else(|| v.get("title"))
        .and_then(|q| q.as_str())
        .unwrap_or("Unknown Market")
        .to_string();

    let maker_address = v
        .get("user")
        .and_then(|u| u.get("id"))
        .or_else(|| v.get("maker_address"))
        .and_then(|a| a.as_str())
        .filter(|a| !a.is_empty())
        .map(|a| a.to_string());

    let side = ["side", "type"]
        .iter()
        .find_map(|k| v.get(k))
        .and_then(|s| s.as_str())
        .and_then(|s| match s.to_ascii_uppercase().as_str() {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        });

    let price = v.get("price").and_then(value_as_f64);

    Ok(Trade {
        amount_usd,
        timestamp,
        outcome,
        question,
        maker_address,
        side,
        price,
    })
}

/// Numeric feed fields arrive as JSON numbers or as decimal strings.
fn value_as_f64(v: &serde_json::Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

fn value_as_i64(v: &serde_json::Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        .or_else(|| v.as_f64().map(|f| f as i64))
}

fn cache_busted_url(base: &str, millis: u128) -> String {
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{base}{sep}t={millis}")
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
