use std::time::Duration;

use crate::latency::FetchLatency;
use crate::refresh::CycleOutcome;
use crate::types::FeedSnapshot;

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    /// No cycle has completed yet.
    Connecting,
    Live,
    Offline(String),
}

pub struct DashboardApp {
    pub status: FeedStatus,
    /// The one rendered snapshot — replaced whole on every successful cycle.
    pub snapshot: FeedSnapshot,
    pub latency: FetchLatency,
    /// Shown in the footer next to the key hints.
    pub refresh_interval_secs: u64,
}

impl DashboardApp {
    pub fn new(refresh_interval_secs: u64) -> Self {
        Self {
            status: FeedStatus::Connecting,
            snapshot: FeedSnapshot::default(),
            latency: FetchLatency::new(),
            refresh_interval_secs,
        }
    }

    /// Fold one cycle outcome into the displayed state. A failure only flips
    /// the status indicator — the previous snapshot stays on screen.
    pub fn apply(&mut self, outcome: CycleOutcome, took: Duration) {
        match outcome {
            CycleOutcome::Success(snapshot) => {
                self.snapshot = snapshot;
                self.status = FeedStatus::Live;
            }
            CycleOutcome::Failed(reason) => {
                self.status = FeedStatus::Offline(reason);
            }
            CycleOutcome::Skipped => return,
        }
        self.latency.record(took);
    }
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Whole dollars with thousands separators: 75000.4 → "75,000".
pub fn format_usd(v: f64) -> String {
    let whole = v.abs().round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Unix seconds → HH:MM:SS (UTC).
pub fn format_time_secs(secs: i64) -> String {
    let secs = secs.rem_euclid(86_400) as u64;
    let h = secs / 3600;
    let m = (secs / 60) % 60;
    let s = secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Unix seconds → HH:MM (UTC), the card timestamp format.
pub fn format_time_short(secs: i64) -> String {
    let secs = secs.rem_euclid(86_400) as u64;
    let h = secs / 3600;
    let m = (secs / 60) % 60;
    format!("{h:02}:{m:02}")
}

/// Probability-unit price → whole cents: 0.42 → "42¢".
pub fn format_price_cents(price: f64) -> String {
    format!("{:.0}¢", price * 100.0)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
