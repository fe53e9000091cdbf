//! Reading usage tables and metadata, writing build output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::StorageError;
use crate::models::{MetadataTables, UsageTable};

/// Metadata file names inside `meta/`.
pub const POKEDEX_FILE: &str = "pokedex.json";
pub const MOVES_FILE: &str = "moves.json";
pub const ITEMS_FILE: &str = "items.json";
pub const ABILITIES_FILE: &str = "abilities.json";
pub const FORMAT_NAMES_FILE: &str = "meta_names.json";

/// Load a stats file into a usage table.
pub fn load_usage_table(path: &Path) -> Result<UsageTable, StorageError> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    let table = UsageTable::from_value(&value);

    info!("Loaded {} Pokémon from {:?}", table.len(), path);
    Ok(table)
}

/// Read one metadata file. Missing or corrupt files yield `Value::Null`.
fn read_meta_file(dir: &Path, name: &str) -> Value {
    let path = dir.join(name);
    if !path.exists() {
        warn!("Metadata file not found: {:?}", path);
        return Value::Null;
    }

    let parsed = fs::read_to_string(&path)
        .map_err(StorageError::from)
        .and_then(|contents| serde_json::from_str(&contents).map_err(StorageError::from));

    match parsed {
        Ok(value) => {
            debug!("Read metadata file {:?}", path);
            value
        }
        Err(e) => {
            warn!("Failed to read metadata file {:?}: {}", path, e);
            Value::Null
        }
    }
}

/// Load every metadata table from `meta_dir`. Never fails; absent tables are empty.
pub fn load_metadata(meta_dir: &Path) -> MetadataTables {
    let metadata = MetadataTables {
        pokedex: MetadataTables::table_from_value(read_meta_file(meta_dir, POKEDEX_FILE)),
        moves: MetadataTables::table_from_value(read_meta_file(meta_dir, MOVES_FILE)),
        items: MetadataTables::table_from_value(read_meta_file(meta_dir, ITEMS_FILE)),
        abilities: MetadataTables::table_from_value(read_meta_file(meta_dir, ABILITIES_FILE)),
        format_names: MetadataTables::names_from_value(read_meta_file(
            meta_dir,
            FORMAT_NAMES_FILE,
        )),
    };

    info!(
        "Loaded metadata: {} species, {} moves, {} items, {} abilities",
        metadata.pokedex.len(),
        metadata.moves.len(),
        metadata.items.len(),
        metadata.abilities.len()
    );
    metadata
}

/// Write build output as pretty JSON, creating parent directories.
pub fn write_global_stats<T: Serialize>(path: &Path, stats: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, stats)?;
    writer.flush()?;

    info!("Wrote global stats to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_usage_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen9ou-1825.json");
        fs::write(
            &path,
            json!({
                "info": {"metagame": "gen9ou", "cutoff": 1825.0, "number of battles": 42},
                "data": {
                    "Great Tusk": {"usage": 0.3},
                    "Kingambit": {"usage": 0.25}
                }
            })
            .to_string(),
        )
        .unwrap();

        let table = load_usage_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.info.number_of_battles, Some(42));
        assert!(table.get("Kingambit").is_some());
    }

    #[test]
    fn test_load_usage_table_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_usage_table(&dir.path().join("missing.json")),
            Err(StorageError::Io(_))
        ));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{not json").unwrap();
        assert!(matches!(
            load_usage_table(&corrupt),
            Err(StorageError::Json(_))
        ));
    }

    #[test]
    fn test_load_metadata_partial() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(POKEDEX_FILE),
            json!({"greattusk": {"name": "Great Tusk", "types": ["Ground", "Fighting"]}})
                .to_string(),
        )
        .unwrap();
        fs::write(dir.path().join(MOVES_FILE), "{broken").unwrap();
        fs::write(
            dir.path().join(FORMAT_NAMES_FILE),
            json!({"gen9ou": "[Gen 9] OU"}).to_string(),
        )
        .unwrap();

        let metadata = load_metadata(dir.path());
        assert_eq!(metadata.pokedex.len(), 1);
        assert!(metadata.moves.is_empty());
        assert!(metadata.items.is_empty());
        assert_eq!(metadata.format_name("gen9ou"), "[Gen 9] OU");
    }

    #[test]
    fn test_load_metadata_missing_dir() {
        let metadata = load_metadata(Path::new("/nonexistent/meta"));
        assert!(metadata.pokedex.is_empty());
        assert!(metadata.format_names.is_empty());
    }

    #[test]
    fn test_write_global_stats_creates_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2025-10").join("global_stats.json");

        write_global_stats(&path, &json!({"gen9ou": {"Great Tusk": {"name": "Great Tusk"}}}))
            .unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["gen9ou"]["Great Tusk"]["name"], "Great Tusk");
    }
}
