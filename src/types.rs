use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Trade
// ---------------------------------------------------------------------------

/// One feed record, validated at the fetch boundary. `amount_usd` is kept as
/// delivered (the upstream producer emits signed values for sells on some
/// feeds); every consumer works off `size_usd()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub amount_usd: f64,
    /// Unix seconds.
    pub timestamp: i64,
    pub outcome: Outcome,
    pub question: String,
    pub maker_address: Option<String>,
    pub side: Option<Side>,
    /// Entry price in probability units (0.0–1.0), when the feed carries it.
    pub price: Option<f64>,
}

impl Trade {
    /// Absolute USD size — the value the classifier, filter and aggregator see.
    pub fn size_usd(&self) -> f64 {
        self.amount_usd.abs()
    }

    /// Buying YES or selling NO backs the market; a feed without a side field
    /// is treated as all buys, so YES alone reads as bullish.
    pub fn is_bullish(&self) -> bool {
        let buy = self.side.unwrap_or(Side::Buy) == Side::Buy;
        let yes = self.outcome == Outcome::Yes;
        buy == yes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// outcomeIndex 0 — the YES / long side.
    Yes,
    /// outcomeIndex 1 — the NO / short side.
    No,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Yes => write!(f, "YES"),
            Outcome::No => write!(f, "NO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

// ---------------------------------------------------------------------------
// Tier classification
// ---------------------------------------------------------------------------

/// Severity bucket assigned by absolute USD size. Ordering follows the
/// threshold table in `config::tier_thresholds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// >= $50k — boss tier.
    BlueWhale,
    /// $10k–$50k
    Whale,
    /// $5k–$10k
    Shark,
    /// $1k–$5k
    Dolphin,
    /// < $1k — floor tier, only assigned when INCLUDE_MINNOW is set.
    Minnow,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::BlueWhale => "BLUE WHALE",
            Tier::Whale => "WHALE",
            Tier::Shark => "SHARK",
            Tier::Dolphin => "DOLPHIN",
            Tier::Minnow => "MINNOW",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Tier::BlueWhale => "🐳",
            Tier::Whale => "🐋",
            Tier::Shark => "🦈",
            Tier::Dolphin => "🐬",
            Tier::Minnow => "🐟",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Batch statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Bullish,
    Bearish,
    /// Empty batch — no ratio to read a direction from.
    NoData,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Bullish => write!(f, "BULLISH"),
            Sentiment::Bearish => write!(f, "BEARISH"),
            Sentiment::NoData => write!(f, "NO DATA"),
        }
    }
}

/// Summary over one filtered batch. Recomputed wholesale every cycle; never
/// incrementally updated.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatsSnapshot {
    pub total_volume: f64,
    pub max_trade_size: f64,
    pub trade_count: usize,
    /// Percentage of trades backing YES, rounded. None when the batch is empty.
    pub buy_ratio_percent: Option<u8>,
}

impl StatsSnapshot {
    /// Ratio >= 50 reads bullish — the tie at exactly 50% resolves bullish.
    pub fn sentiment(&self) -> Sentiment {
        match self.buy_ratio_percent {
            None => Sentiment::NoData,
            Some(p) if p >= 50 => Sentiment::Bullish,
            Some(_) => Sentiment::Bearish,
        }
    }
}

// ---------------------------------------------------------------------------
// View model — handed to the renderer by value, replaced every cycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct WhaleCard {
    pub trade: Trade,
    pub tier: Tier,
    pub bullish: bool,
}

/// Everything one refresh cycle produced. The UI holds exactly one of these
/// and swaps it out whole; no trade survives into the next cycle.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    /// Cards sorted newest-first.
    pub cards: Vec<WhaleCard>,
    pub stats: StatsSnapshot,
    /// Unix seconds of the fetch that produced this snapshot.
    pub fetched_at: i64,
}
