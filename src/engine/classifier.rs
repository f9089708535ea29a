use crate::config::tier_thresholds::{BLUE_WHALE_MIN, DOLPHIN_MIN, SHARK_MIN, WHALE_MIN};
use crate::types::Tier;

/// Threshold table walked for classification — highest severity first.
/// Must stay strictly descending.
const TIER_TABLE: &[(f64, Tier)] = &[
    (BLUE_WHALE_MIN, Tier::BlueWhale),
    (WHALE_MIN, Tier::Whale),
    (SHARK_MIN, Tier::Shark),
    (DOLPHIN_MIN, Tier::Dolphin),
];

/// Map a trade's USD size to its severity tier: the first table entry whose
/// minimum is met. Sizes below every threshold land in the MINNOW floor tier
/// when `include_floor` is set, otherwise `None` and the caller skips the
/// trade. Operates on the absolute value, so signed feed amounts are fine.
pub fn classify(amount_usd: f64, include_floor: bool) -> Option<Tier> {
    let size = amount_usd.abs();
    for &(min, tier) in TIER_TABLE {
        if size >= min {
            return Some(tier);
        }
    }
    include_floor.then_some(Tier::Minnow)
}
