//! Derived statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage rank of a Pokémon within its format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    pub name: String,
    pub rank: u32,
    /// 0 to 100
    pub usage_percent: f64,
}

/// A named share (teammates, natures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub name: String,
    pub usage_percent: f64,
}

/// A share of something that has both a feed id and a display name
/// (moves, items, abilities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedShare {
    pub name: String,
    pub id: String,
    pub usage_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadShare {
    pub spread: String,
    pub usage_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvShare {
    pub ev_string: String,
    pub usage_percent: f64,
}

/// EV investment grouped five ways.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvBuckets {
    pub atk: Vec<EvShare>,
    pub spa: Vec<EvShare>,
    pub spe: Vec<EvShare>,
    pub hp_def: Vec<EvShare>,
    pub hp_spd: Vec<EvShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeraShare {
    pub tera_type: String,
    pub usage_percent: f64,
}

/// Matchup score on a 0 to 100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupScore {
    pub name: String,
    pub score: f64,
}

/// Composite analytics record for one Pokémon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonStats {
    pub name: String,
    pub usage: UsageSummary,

    /// `[hp, atk, def, spa, spd, spe]`, empty when the species is unknown
    pub base_stats: Vec<u32>,
    pub types: Vec<String>,
    pub possible_abilities: Vec<String>,

    pub moves: Vec<IdentifiedShare>,
    pub teammates: Vec<Share>,
    pub items: Vec<IdentifiedShare>,
    pub abilities: Vec<IdentifiedShare>,
    pub natures: Vec<Share>,
    pub spreads: Vec<SpreadShare>,
    pub evs: EvBuckets,
    pub tera_types: Vec<TeraShare>,

    /// Pokémon that reliably beat this one
    pub counters: Vec<MatchupScore>,

    /// Pokémon this one reliably beats
    pub dominates: Vec<MatchupScore>,
}

/// A Pokémon whose counters list contains the subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Victim {
    pub name: String,
    /// 1-based position of the subject in the victim's counters list
    pub rank: u32,
    pub score: f64,
}

/// How often a Pokémon shows up as a counter across a format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub count: u32,
    pub avg_score: f64,
    pub victims: Vec<String>,
}

/// Format entry for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatSummary {
    pub id: String,
    pub name: String,
}

/// Ranked usage list for a whole format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatIndex {
    pub format: String,
    pub rating: u32,
    pub battles: Option<u64>,
    pub pokemon: Vec<UsageSummary>,
}

/// Summary of a global stats build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBuildSummary {
    pub date: String,
    pub computed_at: DateTime<Utc>,
    pub formats: Vec<FormatBuildResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatBuildResult {
    pub format: String,
    pub rating: u32,
    pub pokemon: usize,
}

impl GlobalBuildSummary {
    pub fn new(date: String, formats: Vec<FormatBuildResult>) -> Self {
        Self {
            date,
            computed_at: Utc::now(),
            formats,
        }
    }

    /// Total Pokémon records across all formats.
    pub fn total_pokemon(&self) -> usize {
        self.formats.iter().map(|f| f.pokemon).sum()
    }
}
