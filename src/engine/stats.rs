use crate::types::{Outcome, StatsSnapshot, Trade};

/// Compute the summary strip over one filtered batch. Pure; every cycle
/// recomputes from scratch rather than patching the previous snapshot.
pub fn aggregate(trades: &[Trade]) -> StatsSnapshot {
    let mut total_volume = 0.0;
    let mut max_trade_size = 0.0f64;
    let mut yes_count = 0usize;

    for trade in trades {
        let size = trade.size_usd();
        total_volume += size;
        max_trade_size = max_trade_size.max(size);
        if trade.outcome == Outcome::Yes {
            yes_count += 1;
        }
    }

    let trade_count = trades.len();
    let buy_ratio_percent = if trade_count == 0 {
        None
    } else {
        Some(((100.0 * yes_count as f64) / trade_count as f64).round() as u8)
    };

    StatsSnapshot {
        total_volume,
        max_trade_size,
        trade_count,
        buy_ratio_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    fn trade(amount_usd: f64, outcome: Outcome) -> Trade {
        Trade {
            amount_usd,
            timestamp: 1_700_000_000,
            outcome,
            question: "Q".to_string(),
            maker_address: None,
            side: None,
            price: None,
        }
    }

    #[test]
    fn empty_batch_has_no_data_sentiment_and_no_panic() {
        let stats = aggregate(&[]);
        assert_eq!(stats.trade_count, 0);
        assert!((stats.total_volume - 0.0).abs() < f64::EPSILON);
        assert!((stats.max_trade_size - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.buy_ratio_percent, None);
        assert_eq!(stats.sentiment(), Sentiment::NoData);
    }

    #[test]
    fn sums_and_max_use_absolute_sizes() {
        let stats = aggregate(&[
            trade(10_000.0, Outcome::Yes),
            trade(-25_000.0, Outcome::No),
            trade(5_000.0, Outcome::Yes),
        ]);
        assert!((stats.total_volume - 40_000.0).abs() < 1e-9);
        assert!((stats.max_trade_size - 25_000.0).abs() < 1e-9);
        assert_eq!(stats.trade_count, 3);
        assert_eq!(stats.buy_ratio_percent, Some(67));
    }

    #[test]
    fn fifty_percent_tie_reads_bullish() {
        let stats = aggregate(&[trade(1_000.0, Outcome::Yes), trade(1_000.0, Outcome::No)]);
        assert_eq!(stats.buy_ratio_percent, Some(50));
        assert_eq!(stats.sentiment(), Sentiment::Bullish);
    }

    #[test]
    fn minority_yes_reads_bearish() {
        let stats = aggregate(&[
            trade(1_000.0, Outcome::Yes),
            trade(1_000.0, Outcome::No),
            trade(1_000.0, Outcome::No),
        ]);
        assert_eq!(stats.buy_ratio_percent, Some(33));
        assert_eq!(stats.sentiment(), Sentiment::Bearish);
    }

    #[test]
    fn adding_a_yes_trade_never_lowers_the_ratio() {
        let mut batch = vec![
            trade(1_000.0, Outcome::No),
            trade(1_000.0, Outcome::Yes),
            trade(1_000.0, Outcome::No),
        ];
        for _ in 0..8 {
            let before = aggregate(&batch).buy_ratio_percent.unwrap();
            batch.push(trade(1_000.0, Outcome::Yes));
            let after = aggregate(&batch).buy_ratio_percent.unwrap();
            assert!(after >= before, "ratio dropped from {before} to {after}");
        }
    }
}
