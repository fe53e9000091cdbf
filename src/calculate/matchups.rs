//! Checks-and-counters scoring.
//!
//! A row `[_, score, risk]` in Pokémon A's table keyed by B says how reliably
//! B handles A. Rows with high score and low risk make B a counter of A; the
//! same row seen from B's side makes A one of the Pokémon B dominates.

use std::collections::HashMap;

use crate::calculate::distribution::round3;
use crate::calculate::fuzzy::resolve;
use crate::models::{LeaderboardEntry, Matchup, MatchupScore, UsageRecord, UsageTable, Victim};

/// Rows at or above this risk are too volatile to count.
pub const RISK_CEILING: f64 = 0.1;

/// Rows must score above this to count.
pub const SCORE_FLOOR: f64 = 0.5;

/// Whether a matchup row is a reliable check.
pub fn is_reliable(matchup: &Matchup) -> bool {
    matchup.risk < RISK_CEILING && matchup.score > SCORE_FLOOR
}

fn ranked(mut scores: Vec<(String, f64)>) -> Vec<MatchupScore> {
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));
    scores
        .into_iter()
        .map(|(name, score)| MatchupScore {
            name,
            score: round3(score * 100.0),
        })
        .collect()
}

/// Reliable counters listed in one record's own table.
pub fn counters_of(record: &UsageRecord) -> Vec<MatchupScore> {
    ranked(
        record
            .checks_and_counters
            .iter()
            .filter(|(_, m)| is_reliable(m))
            .map(|(name, m)| (name.clone(), m.score))
            .collect(),
    )
}

/// Pokémon that reliably beat `subject`.
pub fn counters(subject: &str, table: &UsageTable) -> Vec<MatchupScore> {
    resolve(subject, table.names())
        .and_then(|name| table.get(&name))
        .map(counters_of)
        .unwrap_or_default()
}

/// Pokémon that `subject` reliably beats, found by scanning every other
/// Pokémon's table for a row keyed by the subject.
pub fn dominates(subject: &str, table: &UsageTable) -> Vec<MatchupScore> {
    let Some(subject) = resolve(subject, table.names()) else {
        return Vec::new();
    };

    ranked(
        table
            .records()
            .iter()
            .filter(|record| record.name != subject)
            .filter_map(|record| {
                record
                    .matchup_against(&subject)
                    .filter(|m| is_reliable(m))
                    .map(|m| (record.name.clone(), m.score))
            })
            .collect(),
    )
}

/// Every Pokémon whose counters list contains `subject`, with the subject's
/// position in that list.
pub fn victims(subject: &str, table: &UsageTable) -> Vec<Victim> {
    let Some(subject) = resolve(subject, table.names()) else {
        return Vec::new();
    };

    let mut found: Vec<Victim> = table
        .records()
        .iter()
        .filter_map(|record| {
            counters_of(record)
                .into_iter()
                .enumerate()
                .find(|(_, counter)| counter.name == subject)
                .map(|(position, counter)| Victim {
                    name: record.name.clone(),
                    rank: position as u32 + 1,
                    score: counter.score,
                })
        })
        .collect();

    found.sort_by(|a, b| b.score.total_cmp(&a.score));
    found
}

/// Most common counters across the format, by how many Pokémon each one
/// counters and then by average score.
pub fn leaderboard(table: &UsageTable) -> Vec<LeaderboardEntry> {
    struct Tally {
        name: String,
        total_score: f64,
        victims: Vec<String>,
    }

    let mut tallies: Vec<Tally> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in table.records() {
        for counter in counters_of(record) {
            let slot = *index.entry(counter.name.clone()).or_insert_with(|| {
                tallies.push(Tally {
                    name: counter.name.clone(),
                    total_score: 0.0,
                    victims: Vec::new(),
                });
                tallies.len() - 1
            });
            tallies[slot].total_score += counter.score;
            tallies[slot].victims.push(record.name.clone());
        }
    }

    let mut entries: Vec<LeaderboardEntry> = tallies
        .into_iter()
        .map(|tally| {
            let count = tally.victims.len() as u32;
            LeaderboardEntry {
                name: tally.name,
                count,
                avg_score: round3(tally.total_score / count.max(1) as f64),
                victims: tally.victims,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.avg_score.total_cmp(&a.avg_score))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(value: serde_json::Value) -> UsageTable {
        UsageTable::from_value(&json!({ "data": value }))
    }

    fn sample() -> UsageTable {
        table(json!({
            "Great Tusk": {
                "usage": 0.3,
                "Checks and Counters": {
                    "Gholdengo": [0.2, 0.65, 0.05],
                    "Dragapult": [0.2, 0.70, 0.09],
                    "Kingambit": [0.2, 0.80, 0.15],
                    "Iron Valiant": [0.2, 0.45, 0.01]
                }
            },
            "Kingambit": {
                "usage": 0.25,
                "Checks and Counters": {
                    "Great Tusk": [0.3, 0.72, 0.04],
                    "Gholdengo": [0.2, 0.55, 0.02]
                }
            },
            "Gholdengo": {
                "usage": 0.2,
                "Checks and Counters": {
                    "Great Tusk": [0.3, 0.60, 0.08],
                    "Kingambit": [0.3, 0.90, 0.02]
                }
            },
            "Dragapult": {
                "usage": 0.1,
                "Checks and Counters": {}
            }
        }))
    }

    #[test]
    fn test_filter_boundaries() {
        assert!(is_reliable(&Matchup::new(0.2, 0.65, 0.05)));
        assert!(!is_reliable(&Matchup::new(0.2, 0.65, 0.15)));
        assert!(!is_reliable(&Matchup::new(0.2, 0.5, 0.05)));
        assert!(!is_reliable(&Matchup::new(0.2, 0.65, 0.1)));
    }

    #[test]
    fn test_counters_ranked_and_scaled() {
        let counters = counters("Great Tusk", &sample());
        let names: Vec<&str> = counters.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Dragapult", "Gholdengo"]);
        assert_eq!(counters[0].score, 70.0);
        assert_eq!(counters[1].score, 65.0);
    }

    #[test]
    fn test_counters_risk_excludes() {
        let reliable = table(json!({
            "Great Tusk": {"Checks and Counters": {"Gholdengo": [0.2, 0.65, 0.05]}}
        }));
        let risky = table(json!({
            "Great Tusk": {"Checks and Counters": {"Gholdengo": [0.2, 0.65, 0.15]}}
        }));

        let found = counters("Great Tusk", &reliable);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].score, 65.0);
        assert!(counters("Great Tusk", &risky).is_empty());
    }

    #[test]
    fn test_counters_fuzzy_subject() {
        assert_eq!(counters("great tusk", &sample()).len(), 2);
        assert!(counters("zzz", &sample()).is_empty());
    }

    #[test]
    fn test_short_tuples_ignored() {
        let t = table(json!({
            "Great Tusk": {"Checks and Counters": {"Gholdengo": [0.2, 0.9]}}
        }));
        assert!(counters("Great Tusk", &t).is_empty());
    }

    #[test]
    fn test_dominates_scans_other_tables() {
        let dominated = dominates("Great Tusk", &sample());
        let names: Vec<&str> = dominated.iter().map(|d| d.name.as_str()).collect();

        assert_eq!(names, vec!["Kingambit", "Gholdengo"]);
        assert_eq!(dominated[0].score, 72.0);
    }

    #[test]
    fn test_dominates_independent_of_own_table() {
        // Dragapult lists nothing, yet it still counters Great Tusk.
        let dominated = dominates("Dragapult", &sample());
        assert_eq!(dominated.len(), 1);
        assert_eq!(dominated[0].name, "Great Tusk");
        assert!(counters("Dragapult", &sample()).is_empty());
    }

    #[test]
    fn test_dominates_skips_self_rows() {
        let t = table(json!({
            "Ditto": {"Checks and Counters": {"Ditto": [0.5, 0.9, 0.01]}}
        }));
        assert!(dominates("Ditto", &t).is_empty());
    }

    #[test]
    fn test_victims() {
        let victims = victims("Gholdengo", &sample());

        assert_eq!(victims.len(), 2);
        assert_eq!(victims[0].name, "Great Tusk");
        assert_eq!(victims[0].rank, 2);
        assert_eq!(victims[0].score, 65.0);
        assert_eq!(victims[1].name, "Kingambit");
        assert_eq!(victims[1].rank, 2);
    }

    #[test]
    fn test_leaderboard() {
        let board = leaderboard(&sample());

        assert_eq!(board[0].name, "Great Tusk");
        assert_eq!(board[0].count, 2);
        assert_eq!(board[0].avg_score, 66.0);
        assert_eq!(board[0].victims, vec!["Kingambit", "Gholdengo"]);

        assert_eq!(board[1].name, "Gholdengo");
        assert_eq!(board[1].avg_score, 60.0);
        assert_eq!(board[1].victims, vec!["Great Tusk", "Kingambit"]);

        let singles: Vec<&str> = board[2..].iter().map(|e| e.name.as_str()).collect();
        assert_eq!(singles, vec!["Kingambit", "Dragapult"]);
    }

    #[test]
    fn test_empty_table() {
        let empty = UsageTable::default();
        assert!(counters("Anything", &empty).is_empty());
        assert!(dominates("Anything", &empty).is_empty());
        assert!(leaderboard(&empty).is_empty());
    }
}
