//! Composite per-Pokémon records.
//!
//! [`collect`] resolves a name once and then runs every extractor against the
//! resolved record. Each extractor degrades to empty output on its own, so a
//! Pokémon missing from the pokedex still gets its usage breakdown.

use crate::calculate::distribution::{
    normalize, popularity, round3, Denominator, RankedShare,
};
use crate::calculate::fuzzy::resolve;
use crate::calculate::matchups::{counters_of, dominates};
use crate::calculate::spreads::{decode_evs, natures, top_spreads};
use crate::models::{
    FormatIndex, IdentifiedShare, MetadataTables, PokemonStats, Share, TeraShare, UsageRecord,
    UsageSummary, UsageTable, Weights,
};

/// Build the full record for `name`, or `None` when it matches nothing in the table.
pub fn collect(name: &str, table: &UsageTable, metadata: &MetadataTables) -> Option<PokemonStats> {
    let resolved = resolve(name, table.names())?;
    let record = table.get(&resolved)?;
    let usage = usage_summary(&resolved, table)?;
    let pop = popularity(record);

    let species = metadata.species(&resolved);

    Some(PokemonStats {
        name: resolved.clone(),
        usage,
        base_stats: species
            .map(|s| s.base_stats.to_array().to_vec())
            .unwrap_or_default(),
        types: species.map(|s| s.types.clone()).unwrap_or_default(),
        possible_abilities: species
            .map(|s| s.abilities.values().cloned().collect())
            .unwrap_or_default(),
        moves: identified(
            &record.moves,
            Denominator::Popularity(pop),
            |id| metadata.move_name(id),
        ),
        teammates: teammates(record, pop),
        items: identified(&record.items, Denominator::CategoryTotal, |id| {
            metadata.item_name(id)
        }),
        abilities: identified(&record.abilities, Denominator::CategoryTotal, |id| {
            metadata.ability_name(id)
        }),
        natures: natures(&record.spreads, pop),
        spreads: top_spreads(&record.spreads, pop),
        evs: decode_evs(&record.spreads, pop),
        tera_types: tera_types(&record.tera_types),
        counters: counters_of(record),
        dominates: dominates(&resolved, table),
    })
}

/// Usage rank (1-based) and percentage of an exact table key.
pub fn usage_summary(name: &str, table: &UsageTable) -> Option<UsageSummary> {
    table
        .ranked_by_usage()
        .into_iter()
        .enumerate()
        .find(|(_, record)| record.name == name)
        .map(|(position, record)| summarize(position, record))
}

fn summarize(position: usize, record: &UsageRecord) -> UsageSummary {
    UsageSummary {
        name: record.name.clone(),
        rank: position as u32 + 1,
        usage_percent: round3(record.usage * 100.0),
    }
}

/// Most used Pokémon in the table.
pub fn top_pokemon(table: &UsageTable) -> Option<&str> {
    table
        .ranked_by_usage()
        .first()
        .map(|record| record.name.as_str())
}

/// Ranked usage list for the whole table.
pub fn format_index(format: &str, rating: u32, table: &UsageTable) -> FormatIndex {
    FormatIndex {
        format: format.to_string(),
        rating,
        battles: table.info.number_of_battles,
        pokemon: table
            .ranked_by_usage()
            .into_iter()
            .enumerate()
            .map(|(position, record)| summarize(position, record))
            .collect(),
    }
}

fn identified<'a, F>(weights: &Weights, denominator: Denominator, display: F) -> Vec<IdentifiedShare>
where
    F: Fn(&str) -> Option<&'a str>,
{
    normalize(weights, denominator)
        .into_iter()
        .map(|RankedShare { name, usage_percent, .. }| IdentifiedShare {
            name: display(&name).map(str::to_string).unwrap_or_else(|| name.clone()),
            id: name,
            usage_percent,
        })
        .collect()
}

fn teammates(record: &UsageRecord, pop: f64) -> Vec<Share> {
    normalize(&record.teammates, Denominator::Teammates(pop))
        .into_iter()
        .map(|s| Share {
            name: s.name,
            usage_percent: s.usage_percent,
        })
        .collect()
}

fn tera_types(weights: &Weights) -> Vec<TeraShare> {
    normalize(weights, Denominator::CategoryTotal)
        .into_iter()
        .map(|s| TeraShare {
            tera_type: capitalize(&s.name),
            usage_percent: s.usage_percent,
        })
        .collect()
}

/// First character upper case, the rest lower case.
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
