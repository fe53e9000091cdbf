//! Weighted-distribution normalization and adaptive top-N selection.

use crate::models::{UsageRecord, Weights};

/// Entries shown for truncated categories even when few clear the threshold.
pub const DEFAULT_MIN_COUNT: usize = 5;

/// Share (in percent) an entry needs to count toward the adaptive limit.
pub const VISIBILITY_THRESHOLD: f64 = 1.0;

/// Teammate weights are counted once per team slot.
pub const TEAM_SLOTS: f64 = 6.0;

/// Round to three decimal places.
///
/// Rounds the exact binary value, so `1.2345` (stored just below the
/// midpoint) becomes `1.234`. Scaling by 1000 first would round it up.
pub fn round3(value: f64) -> f64 {
    format!("{:.3}", value).parse().unwrap_or(value)
}

/// `value / denominator` as a rounded percentage.
pub fn to_percent(value: f64, denominator: f64) -> f64 {
    round3(value / denominator * 100.0)
}

/// Overall popularity weight of a Pokémon: the sum of its ability weights,
/// floored at 1. Every battle reports exactly one ability, so this stands in
/// for the number of times the Pokémon was brought.
pub fn popularity(record: &UsageRecord) -> f64 {
    if record.abilities.is_empty() {
        return 1.0;
    }
    record.abilities.total().max(1.0)
}

/// What a category's weights are divided by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denominator {
    /// Sum of the category itself
    CategoryTotal,
    /// The Pokémon's popularity weight
    Popularity(f64),
    /// Popularity, raised to the per-slot teammate total when that is larger
    Teammates(f64),
}

impl Denominator {
    pub fn resolve(&self, weights: &Weights) -> f64 {
        match *self {
            Denominator::CategoryTotal => weights.total().max(1.0),
            Denominator::Popularity(popularity) => popularity.max(1.0),
            Denominator::Teammates(popularity) => {
                let per_slot = weights.total() / TEAM_SLOTS;
                popularity.max(1.0).max(per_slot)
            }
        }
    }
}

/// One ranked entry of a normalized distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedShare {
    pub name: String,
    pub weight: f64,
    pub usage_percent: f64,
}

/// Convert raw weights into percentages, sorted by weight descending.
/// Ties keep feed order.
pub fn normalize(weights: &Weights, denominator: Denominator) -> Vec<RankedShare> {
    let total = denominator.resolve(weights);

    let mut ranked: Vec<RankedShare> = weights
        .iter()
        .map(|(name, weight)| RankedShare {
            name: name.to_string(),
            weight,
            usage_percent: to_percent(weight, total),
        })
        .collect();

    ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranked
}

/// Keep `max(min_count, entries at or above 1%)` entries. Never re-sorts.
pub fn select_top(mut ranked: Vec<RankedShare>, min_count: usize) -> Vec<RankedShare> {
    let visible = ranked
        .iter()
        .filter(|share| share.usage_percent >= VISIBILITY_THRESHOLD)
        .count();
    ranked.truncate(min_count.max(visible));
    ranked
}
