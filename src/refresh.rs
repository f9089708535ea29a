use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use crate::config::Config;
use crate::engine::{classifier, filter, stats};
use crate::fetcher::{self, FetchStats};
use crate::types::{FeedSnapshot, Trade, WhaleCard};

// ---------------------------------------------------------------------------
// Cycle state machine
// ---------------------------------------------------------------------------

/// Where the loop currently is. `Fetching` spans exactly one awaited request;
/// a tick landing inside it is skipped rather than queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Fetching,
}

/// What one cycle produced. The UI applies this wholesale.
#[derive(Debug)]
pub enum CycleOutcome {
    Success(FeedSnapshot),
    Failed(String),
    /// Reentrancy guard fired — a previous cycle was still in flight.
    Skipped,
}

pub struct RefreshLoop {
    client: reqwest::Client,
    cfg: Config,
    phase: CyclePhase,
}

impl RefreshLoop {
    pub fn new(client: reqwest::Client, cfg: Config) -> Self {
        Self {
            client,
            cfg,
            phase: CyclePhase::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.cfg.refresh_interval_secs)
    }

    /// Claim the Fetching phase. False means a cycle is already in flight and
    /// the caller must skip this tick.
    fn try_begin_cycle(&mut self) -> bool {
        if self.phase == CyclePhase::Fetching {
            return false;
        }
        self.phase = CyclePhase::Fetching;
        true
    }

    fn finish_cycle(&mut self) {
        self.phase = CyclePhase::Idle;
    }

    /// Run one fetch → filter → aggregate → classify cycle. Every failure is
    /// absorbed into the returned outcome; nothing here can take the loop down.
    /// Returns the outcome and how long the cycle took.
    pub async fn run_cycle(&mut self) -> (CycleOutcome, Duration) {
        if !self.try_begin_cycle() {
            warn!("refresh tick skipped: previous cycle still in flight");
            return (CycleOutcome::Skipped, Duration::ZERO);
        }

        let started = Instant::now();
        let outcome = match fetcher::fetch_trades(&self.client, &self.cfg).await {
            Ok((trades, stats)) => {
                log_fetch(&stats);
                CycleOutcome::Success(build_snapshot(trades, &self.cfg))
            }
            Err(e) => {
                warn!(network = e.is_network(), "refresh cycle failed: {e}");
                CycleOutcome::Failed(e.to_string())
            }
        };

        self.finish_cycle();
        (outcome, started.elapsed())
    }
}

fn log_fetch(stats: &FetchStats) {
    let rejected = stats.feed_total - stats.parsed;
    if rejected > 0 {
        warn!(
            "[FEED] rejected: no_amount={} bad_outcome={} no_timestamp={} (samples: {:?})",
            stats.rejected_no_amount,
            stats.rejected_bad_outcome,
            stats.rejected_no_timestamp,
            stats.reject_samples,
        );
    }
    info!(
        feed_total = stats.feed_total,
        parsed = stats.parsed,
        "Feed fetch complete: {}/{} records parsed",
        stats.parsed,
        stats.feed_total,
    );
}

// ---------------------------------------------------------------------------
// Snapshot assembly
// ---------------------------------------------------------------------------

/// Turn a raw batch into the cycle's snapshot: significance filter, newest
/// first, stats over the whole filtered batch, then one card per trade that
/// classifies into a tier. A trade below every threshold with the floor tier
/// disabled still counts toward the stats but gets no card.
pub fn build_snapshot(trades: Vec<Trade>, cfg: &Config) -> FeedSnapshot {
    let mut kept = filter::significant(trades, cfg.min_trade_usd);
    kept.sort_by_key(|t| std::cmp::Reverse(t.timestamp));

    let stats = stats::aggregate(&kept);

    let cards: Vec<WhaleCard> = kept
        .into_iter()
        .filter_map(|trade| {
            let tier = classifier::classify(trade.size_usd(), cfg.include_minnow)?;
            let bullish = trade.is_bullish();
            Some(WhaleCard { trade, tier, bullish })
        })
        .collect();

    FeedSnapshot {
        cards,
        stats,
        fetched_at: now_secs(),
    }
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, Sentiment, Tier, Trade};

    fn test_config() -> Config {
        Config {
            feed_url: "http://localhost:8000/data/whales.json".to_string(),
            log_level: "info".to_string(),
            refresh_interval_secs: 30,
            min_trade_usd: 1000.0,
            include_minnow: false,
            fetch_timeout_secs: 10,
        }
    }

    fn trade(amount_usd: f64, outcome: Outcome, timestamp: i64) -> Trade {
        Trade {
            amount_usd,
            timestamp,
            outcome,
            question: format!("Q{timestamp}"),
            maker_address: None,
            side: None,
            price: None,
        }
    }

    #[test]
    fn guard_rejects_overlapping_cycles() {
        let cfg = test_config();
        let mut refresher = RefreshLoop::new(reqwest::Client::new(), cfg);
        assert_eq!(refresher.phase, CyclePhase::Idle);

        assert!(refresher.try_begin_cycle());
        assert_eq!(refresher.phase, CyclePhase::Fetching);
        assert!(!refresher.try_begin_cycle(), "second begin must be refused");

        refresher.finish_cycle();
        assert_eq!(refresher.phase, CyclePhase::Idle);
        assert!(refresher.try_begin_cycle(), "idle loop accepts the next tick");
    }

    #[test]
    fn snapshot_filters_classifies_and_aggregates() {
        let cfg = test_config();
        let snapshot = build_snapshot(
            vec![
                trade(75_000.0, Outcome::Yes, 1_700_000_000),
                trade(500.0, Outcome::No, 1_700_000_001),
            ],
            &cfg,
        );

        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].tier, Tier::BlueWhale);
        assert!(snapshot.cards[0].bullish);
        assert_eq!(snapshot.stats.trade_count, 1);
        assert!((snapshot.stats.total_volume - 75_000.0).abs() < 1e-9);
        assert!((snapshot.stats.max_trade_size - 75_000.0).abs() < 1e-9);
        assert_eq!(snapshot.stats.buy_ratio_percent, Some(100));
        assert_eq!(snapshot.stats.sentiment(), Sentiment::Bullish);
    }

    #[test]
    fn raw_feed_to_snapshot_end_to_end() {
        let raw = r#"[
            {"amountUSD":"75000","outcomeIndex":0,"timestamp":1700000000,"market":{"question":"Q1"}},
            {"amountUSD":"500","outcomeIndex":1,"timestamp":1700000001,"market":{"question":"Q2"}}
        ]"#;
        let items: Vec<serde_json::Value> = serde_json::from_str(raw).expect("valid test JSON");
        let (trades, fetch_stats) = fetcher::parse_feed_batch(&items);
        assert_eq!(fetch_stats.feed_total, 2);
        assert_eq!(fetch_stats.parsed, 2);

        let snapshot = build_snapshot(trades, &test_config());
        assert_eq!(snapshot.cards.len(), 1, "the $500 trade is filtered out");
        assert_eq!(snapshot.cards[0].trade.question, "Q1");
        assert_eq!(snapshot.cards[0].tier, Tier::BlueWhale);
        assert_eq!(snapshot.stats.trade_count, 1);
        assert!((snapshot.stats.total_volume - 75_000.0).abs() < 1e-9);
        assert!((snapshot.stats.max_trade_size - 75_000.0).abs() < 1e-9);
        assert_eq!(snapshot.stats.buy_ratio_percent, Some(100));
        assert_eq!(snapshot.stats.sentiment(), Sentiment::Bullish);
    }

    #[test]
    fn cards_are_sorted_newest_first() {
        let cfg = test_config();
        let snapshot = build_snapshot(
            vec![
                trade(2_000.0, Outcome::Yes, 100),
                trade(3_000.0, Outcome::Yes, 300),
                trade(4_000.0, Outcome::Yes, 200),
            ],
            &cfg,
        );
        let times: Vec<i64> = snapshot.cards.iter().map(|c| c.trade.timestamp).collect();
        assert_eq!(times, vec![300, 200, 100]);
    }

    #[test]
    fn empty_feed_produces_quiet_snapshot() {
        let cfg = test_config();
        let snapshot = build_snapshot(Vec::new(), &cfg);
        assert!(snapshot.cards.is_empty());
        assert_eq!(snapshot.stats.trade_count, 0);
        assert_eq!(snapshot.stats.sentiment(), Sentiment::NoData);
    }

    #[test]
    fn unclassified_trades_count_toward_stats_but_render_no_card() {
        let mut cfg = test_config();
        cfg.min_trade_usd = 100.0;

        let snapshot = build_snapshot(vec![trade(500.0, Outcome::Yes, 1)], &cfg);
        assert_eq!(snapshot.stats.trade_count, 1);
        assert!(snapshot.cards.is_empty(), "no floor tier configured");

        cfg.include_minnow = true;
        let snapshot = build_snapshot(vec![trade(500.0, Outcome::Yes, 1)], &cfg);
        assert_eq!(snapshot.cards.len(), 1);
        assert_eq!(snapshot.cards[0].tier, Tier::Minnow);
    }
}
