use crate::types::Trade;

/// Keep trades whose absolute USD size meets `min_usd`, preserving relative
/// order. Records whose amount failed to parse never get here — the fetcher
/// rejects them at the boundary — so this stays total with no error path.
pub fn significant(trades: Vec<Trade>, min_usd: f64) -> Vec<Trade> {
    trades
        .into_iter()
        .filter(|t| t.size_usd() >= min_usd)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Outcome;

    fn trade(amount_usd: f64, timestamp: i64) -> Trade {
        Trade {
            amount_usd,
            timestamp,
            outcome: Outcome::Yes,
            question: "Q".to_string(),
            maker_address: None,
            side: None,
            price: None,
        }
    }

    #[test]
    fn drops_below_threshold_and_preserves_order() {
        let trades = vec![trade(500.0, 1), trade(2_000.0, 2), trade(999.0, 3), trade(1_000.0, 4)];
        let kept = significant(trades, 1_000.0);
        let timestamps: Vec<i64> = kept.iter().map(|t| t.timestamp).collect();
        assert_eq!(timestamps, vec![2, 4]);
    }

    #[test]
    fn negative_amounts_filter_on_magnitude() {
        let kept = significant(vec![trade(-5_000.0, 1), trade(-100.0, 2)], 1_000.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].timestamp, 1);
    }

    #[test]
    fn idempotent() {
        let trades = vec![trade(500.0, 1), trade(2_000.0, 2), trade(80_000.0, 3)];
        let once = significant(trades, 1_000.0);
        let twice = significant(once.clone(), 1_000.0);
        assert_eq!(once.len(), twice.len());
        let a: Vec<i64> = once.iter().map(|t| t.timestamp).collect();
        let b: Vec<i64> = twice.iter().map(|t| t.timestamp).collect();
        assert_eq!(a, b);
    }
}
