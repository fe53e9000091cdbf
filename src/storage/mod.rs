//! Filesystem data lake operations.
//!
//! Layout rooted at the data directory:
//! - `meta/` holds the pokedex, moves, items, abilities and format names
//! - `YYYY-MM/data/<format>-<rating>.json` holds monthly usage stats
//! - `YYYY-MM/global_stats.json` is written by the global build

pub mod discovery;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

pub use discovery::{
    best_stats_file, generation, latest_date, list_formats, list_ratings, list_stats_files,
    stats_file, validate_format, StatsFile,
};
pub use loader::{load_metadata, load_usage_table, write_global_stats};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("No YYYY-MM date directory under {0}")]
    NoDateDirectory(PathBuf),

    #[error("Invalid format id '{0}'")]
    InvalidFormat(String),

    #[error("No stats file for format '{format}' in {date}")]
    NoStatsFile { format: String, date: String },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.data_dir.join("meta")
    }

    pub fn date_dir(&self, date: &str) -> PathBuf {
        self.data_dir.join(date)
    }

    /// Directory holding the `<format>-<rating>.json` files for a month.
    pub fn stats_dir(&self, date: &str) -> PathBuf {
        self.date_dir(date).join("data")
    }

    pub fn global_stats_path(&self, date: &str) -> PathBuf {
        self.date_dir(date).join("global_stats.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
