//! Raw usage records as published by the monthly "chaos" stats feed.
//!
//! The feed is loosely shaped JSON. Every field is read explicitly and any
//! entry with an unexpected shape is treated as absent, so a record can always
//! be built for a name that exists in the file.

use std::collections::HashMap;

use serde_json::Value;

/// Identifier → raw weight pairs, kept in feed order.
///
/// Weights are not normalized and need not sum to anything in particular.
/// Duplicate identifiers are merged into the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weights(Vec<(String, f64)>);

impl Weights {
    /// Build from a JSON object of `name: number`.
    ///
    /// Non-numeric, negative or non-finite weights are skipped.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };

        map.iter()
            .filter_map(|(name, weight)| {
                let weight = weight.as_f64()?;
                (weight.is_finite() && weight >= 0.0).then(|| (name.clone(), weight))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, weight)| (name.as_str(), *weight))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, weight)| weight).sum()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, weight)| *weight)
    }
}

impl FromIterator<(String, f64)> for Weights {
    /// Collect pairs, accumulating weights of repeated names in place.
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for (name, weight) in iter {
            match positions.get(&name) {
                Some(&idx) => entries[idx].1 += weight,
                None => {
                    positions.insert(name.clone(), entries.len());
                    entries.push((name, weight));
                }
            }
        }

        Self(entries)
    }
}

/// One row of a "Checks and Counters" table.
///
/// The feed does not name the three positions. Index 1 is used as the
/// matchup score and index 2 as its risk; index 0 is carried but unused.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup {
    pub first: f64,
    pub score: f64,
    pub risk: f64,
}

impl Matchup {
    pub fn new(first: f64, score: f64, risk: f64) -> Self {
        Self { first, score, risk }
    }

    /// Parse a `[num, num, num, ...]` array. Shorter arrays are rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() < 3 {
            return None;
        }
        Some(Self {
            first: items[0].as_f64()?,
            score: items[1].as_f64()?,
            risk: items[2].as_f64()?,
        })
    }
}

/// Per-Pokémon usage record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageRecord {
    /// Canonical species name (the key in the feed)
    pub name: String,

    /// Fraction of teams (0.0 to 1.0)
    pub usage: f64,

    pub moves: Weights,
    pub items: Weights,
    pub abilities: Weights,
    pub teammates: Weights,
    pub spreads: Weights,
    pub tera_types: Weights,

    /// Opponent → matchup row, in feed order
    pub checks_and_counters: Vec<(String, Matchup)>,
}

impl UsageRecord {
    /// Build a record from its JSON body. A non-object body yields an empty record.
    pub fn from_value(name: &str, value: &Value) -> Self {
        let checks_and_counters = match value.get("Checks and Counters") {
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(opponent, row)| {
                    Matchup::from_value(row).map(|m| (opponent.clone(), m))
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            name: name.to_string(),
            usage: value.get("usage").and_then(Value::as_f64).unwrap_or(0.0),
            moves: Weights::from_value(value.get("Moves")),
            items: Weights::from_value(value.get("Items")),
            abilities: Weights::from_value(value.get("Abilities")),
            teammates: Weights::from_value(value.get("Teammates")),
            spreads: Weights::from_value(value.get("Spreads")),
            tera_types: Weights::from_value(value.get("Tera Types")),
            checks_and_counters,
        }
    }

    /// Look up this Pokémon's matchup row against `opponent`.
    pub fn matchup_against(&self, opponent: &str) -> Option<&Matchup> {
        self.checks_and_counters
            .iter()
            .find(|(name, _)| name == opponent)
            .map(|(_, m)| m)
    }
}

/// Header block of a stats file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedInfo {
    pub metagame: Option<String>,
    pub cutoff: Option<f64>,
    pub number_of_battles: Option<u64>,
}

impl FeedInfo {
    fn from_value(value: Option<&Value>) -> Self {
        let Some(info) = value else {
            return Self::default();
        };
        Self {
            metagame: info
                .get("metagame")
                .and_then(Value::as_str)
                .map(str::to_string),
            cutoff: info.get("cutoff").and_then(Value::as_f64),
            number_of_battles: info.get("number of battles").and_then(Value::as_u64),
        }
    }
}

/// All usage records of one format at one rating cutoff.
#[derive(Debug, Clone, Default)]
pub struct UsageTable {
    pub info: FeedInfo,
    records: Vec<UsageRecord>,
    index: HashMap<String, usize>,
}

impl UsageTable {
    pub fn from_records(info: FeedInfo, records: Vec<UsageRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.clone(), i))
            .collect();
        Self {
            info,
            records,
            index,
        }
    }

    /// Build a table from a parsed stats file.
    ///
    /// Accepts either the wrapped `{"info": .., "data": {..}}` layout or a bare
    /// name → record object.
    pub fn from_value(value: &Value) -> Self {
        let (info, data) = match value.get("data") {
            Some(data @ Value::Object(_)) => (FeedInfo::from_value(value.get("info")), data),
            _ => (FeedInfo::default(), value),
        };

        let records = match data {
            Value::Object(map) => map
                .iter()
                .map(|(name, body)| UsageRecord::from_value(name, body))
                .collect(),
            _ => Vec::new(),
        };

        Self::from_records(info, records)
    }

    pub fn get(&self, name: &str) -> Option<&UsageRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records sorted by usage (descending), ties kept in feed order.
    pub fn ranked_by_usage(&self) -> Vec<&UsageRecord> {
        let mut ranked: Vec<&UsageRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.usage.total_cmp(&a.usage));
        ranked
    }
}
