//! Statistics extraction engine.
//!
//! Pure, synchronous transformations from a usage table plus metadata into
//! ranked, percentage-normalized views:
//! - Fuzzy name resolution
//! - Weight normalization and adaptive top-N selection
//! - EV spread and nature decoding
//! - Checks-and-counters scoring
//! - Composite per-Pokémon records
//!
//! Nothing here performs I/O or mutates its inputs.

pub mod aggregate;
pub mod distribution;
pub mod final_stats;
pub mod fuzzy;
pub mod matchups;
pub mod spreads;

pub use aggregate::{collect, format_index, top_pokemon, usage_summary};
pub use final_stats::calculate_stats;
pub use fuzzy::{resolve, to_id};
pub use matchups::{counters, dominates, leaderboard, victims};
