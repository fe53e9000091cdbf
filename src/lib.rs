//! # Pokemeta
//!
//! Competitive Pokémon usage statistics analyzer.
//!
//! ## Architecture
//!
//! - **models**: Usage feed records, metadata tables and output records
//! - **calculate**: Distributions, EV spreads, checks and counters, aggregation
//! - **storage**: Filesystem data lake (monthly stats files, metadata)
//! - **global**: Whole-month build across every format
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod global;
pub mod models;
pub mod storage;

pub use models::*;

use std::path::PathBuf;

/// Read a Pokémon name from a URL or CLI slug: dashes become spaces.
pub fn slug_to_name(slug: &str) -> String {
    slug.replace('-', " ")
}

/// Parse `"31"` or `"31/31/31/31/31/0"` into per-stat IVs.
pub fn parse_ivs(s: &str) -> Option<[u32; 6]> {
    let values: Vec<u32> = s
        .split('/')
        .map(|v| v.trim().parse::<u32>().ok().filter(|iv| *iv <= 31))
        .collect::<Option<_>>()?;

    if values.len() == 1 {
        return Some([values[0]; 6]);
    }
    values.try_into().ok()
}

/// Default path for the optional config file.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("./pokemeta.toml")
}
