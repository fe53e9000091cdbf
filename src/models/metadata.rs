//! Species, move, item and ability lookup tables.
//!
//! Loaded once per process and passed by reference into every extractor.

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::calculate::fuzzy::{resolve, to_id};

/// Base stat block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spa: u32,
    pub spd: u32,
    pub spe: u32,
}

impl BaseStats {
    /// `[hp, atk, def, spa, spd, spe]`
    pub fn to_array(&self) -> [u32; 6] {
        [self.hp, self.atk, self.def, self.spa, self.spd, self.spe]
    }
}

/// Pokédex entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeciesInfo {
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: BaseStats,

    /// Slot ("0", "1", "H", "S") → ability name; slot keys sort in slot order
    pub abilities: BTreeMap<String, String>,

    /// Remaining pokedex fields, served untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Move accuracy: a percentage, or `true` for moves that never miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accuracy {
    Percent(u32),
    AlwaysHits(bool),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveInfo {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub move_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_power: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<Accuracy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemInfo {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityInfo {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Immutable metadata context.
#[derive(Debug, Clone, Default)]
pub struct MetadataTables {
    pub pokedex: BTreeMap<String, SpeciesInfo>,
    pub moves: BTreeMap<String, MoveInfo>,
    pub items: BTreeMap<String, ItemInfo>,
    pub abilities: BTreeMap<String, AbilityInfo>,

    /// Format id → display name
    pub format_names: HashMap<String, String>,
}

impl MetadataTables {
    /// Parse an `id → entry` object, dropping entries that do not fit `T`.
    pub fn table_from_value<T: DeserializeOwned>(value: Value) -> BTreeMap<String, T> {
        let Value::Object(map) = value else {
            return BTreeMap::new();
        };

        let total = map.len();
        let table: BTreeMap<String, T> = map
            .into_iter()
            .filter_map(|(id, entry)| serde_json::from_value(entry).ok().map(|e| (id, e)))
            .collect();

        if table.len() < total {
            debug!("Dropped {} malformed metadata entries", total - table.len());
        }
        table
    }

    /// Parse the `format id → display name` object.
    pub fn names_from_value(value: Value) -> HashMap<String, String> {
        let Value::Object(map) = value else {
            return HashMap::new();
        };
        map.into_iter()
            .filter_map(|(id, name)| name.as_str().map(|n| (id, n.to_string())))
            .collect()
    }

    /// Find a species by display name: exact key, then Showdown id, then fuzzy.
    pub fn species(&self, name: &str) -> Option<&SpeciesInfo> {
        if let Some(entry) = self.pokedex.get(name) {
            return Some(entry);
        }
        if let Some(entry) = self.pokedex.get(&to_id(name)) {
            return Some(entry);
        }
        let key = resolve(name, self.pokedex.keys())?;
        self.pokedex.get(&key)
    }

    /// Display name of a move id, if known.
    pub fn move_name(&self, id: &str) -> Option<&str> {
        self.moves
            .get(id)
            .map(|m| m.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn item_name(&self, id: &str) -> Option<&str> {
        self.items
            .get(id)
            .map(|i| i.name.as_str())
            .filter(|n| !n.is_empty())
    }

    pub fn ability_name(&self, id: &str) -> Option<&str> {
        self.abilities
            .get(id)
            .map(|a| a.name.as_str())
            .filter(|n| !n.is_empty())
    }

    /// Display name for a format, falling back to its id.
    pub fn format_name<'a>(&'a self, format_id: &'a str) -> &'a str {
        self.format_names
            .get(format_id)
            .map(String::as_str)
            .unwrap_or(format_id)
    }
}
