//! Global stats build: every format's highest-rated file, every Pokémon.
//!
//! Output shape is `{format: {pokemon: record}}`, with Pokémon in usage order.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::calculate::collect;
use crate::models::{FormatBuildResult, GlobalBuildSummary, MetadataTables};
use crate::storage::{self, StatsFile, StorageConfig, StorageError};

/// Format id → (Pokémon name → composite record).
pub type GlobalStats = BTreeMap<String, Map<String, Value>>;

/// Highest-rated stats file per format for a month.
pub fn best_files(config: &StorageConfig, date: &str) -> Result<Vec<StatsFile>, StorageError> {
    let mut best: BTreeMap<String, StatsFile> = BTreeMap::new();

    for file in storage::list_stats_files(config, date)? {
        let Some(rating) = file.rating else {
            continue;
        };
        let replace = best
            .get(&file.format)
            .and_then(|current| current.rating)
            .map_or(true, |current| rating > current);
        if replace {
            best.insert(file.format.clone(), file);
        }
    }

    Ok(best.into_values().collect())
}

/// Compute the global stats for `date`. Files that fail to load are skipped.
pub fn build(
    config: &StorageConfig,
    metadata: &MetadataTables,
    date: &str,
) -> Result<(GlobalStats, GlobalBuildSummary), StorageError> {
    let started = Instant::now();
    let files = best_files(config, date)?;
    info!("Found {} formats in {}", files.len(), date);

    let mut stats = GlobalStats::new();
    let mut results = Vec::with_capacity(files.len());

    for file in files {
        let table = match storage::load_usage_table(&file.path) {
            Ok(table) => table,
            Err(e) => {
                warn!("Skipping {}: {}", file.format, e);
                continue;
            }
        };

        let mut records = Map::new();
        for record in table.ranked_by_usage() {
            if let Some(pokemon) = collect(&record.name, &table, metadata) {
                records.insert(record.name.clone(), serde_json::to_value(pokemon)?);
            }
        }

        info!("Processed {} Pokémon for {}", records.len(), file.format);
        results.push(FormatBuildResult {
            format: file.format.clone(),
            rating: file.rating.unwrap_or(0),
            pokemon: records.len(),
        });
        stats.insert(file.format, records);
    }

    info!("Global build took {:.2?}", started.elapsed());
    Ok((stats, GlobalBuildSummary::new(date.to_string(), results)))
}

/// Build for the latest month and write the result to `output`, or to the
/// month's `global_stats.json` when no output path is given.
pub fn build_and_write(
    config: &StorageConfig,
    metadata: &MetadataTables,
    output: Option<&Path>,
) -> Result<GlobalBuildSummary, StorageError> {
    let date = storage::latest_date(config)?;
    let (stats, summary) = build(config, metadata, &date)?;

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.global_stats_path(&date));
    storage::write_global_stats(&path, &stats)?;

    Ok(summary)
}
