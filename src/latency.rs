//! Fetch latency histogram for the refresh loop. One sample per completed
//! cycle, successful or failed; values stored in microseconds.

use std::time::Duration;

pub struct FetchLatency {
    histogram: hdrhistogram::Histogram<u64>,
}

impl FetchLatency {
    /// Tracks 1us to 100s, 3 significant figures.
    pub fn new() -> Self {
        let histogram = hdrhistogram::Histogram::new_with_bounds(1, 100_000_000, 3)
            .expect("valid histogram bounds");
        Self { histogram }
    }

    pub fn record(&mut self, d: Duration) {
        let us = d.as_micros().min(u128::from(u64::MAX)) as u64;
        let _ = self.histogram.record(us.max(1));
    }

    /// Returns (p50_ms, p95_ms, p99_ms). None before the first sample.
    pub fn percentiles_ms(&self) -> Option<(f64, f64, f64)> {
        if self.histogram.len() == 0 {
            return None;
        }
        let to_ms = |us: u64| us as f64 / 1000.0;
        Some((
            to_ms(self.histogram.value_at_quantile(0.5)),
            to_ms(self.histogram.value_at_quantile(0.95)),
            to_ms(self.histogram.value_at_quantile(0.99)),
        ))
    }

    pub fn len(&self) -> u64 {
        self.histogram.len()
    }
}

impl Default for FetchLatency {
    fn default() -> Self {
        Self::new()
    }
}
