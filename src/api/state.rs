use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::api::ApiError;
use crate::models::{MetadataTables, UsageTable};
use crate::storage::{self, StatsFile, StorageConfig};

/// A usage table together with the file it was read from.
#[derive(Debug)]
pub struct LoadedTable {
    pub file: StatsFile,
    pub table: UsageTable,
}

impl LoadedTable {
    /// Rating of the backing file, 0 when it has none.
    pub fn rating(&self) -> u32 {
        self.file.rating.unwrap_or(0)
    }
}

/// Usage tables keyed by `(format, rating)` of the file actually loaded.
pub type TableCache = Arc<RwLock<HashMap<(String, Option<u32>), Arc<LoadedTable>>>>;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub metadata: Arc<MetadataTables>,
    pub cors_origin: String,
    pub tables: TableCache,
}

impl AppState {
    pub fn new(storage: StorageConfig, metadata: MetadataTables, cors_origin: String) -> Self {
        Self {
            storage: Arc::new(storage),
            metadata: Arc::new(metadata),
            cors_origin,
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Usage table for `format` in the latest month.
    ///
    /// A missing `rating` falls back to the best file for the format.
    pub async fn usage_table(
        &self,
        format: &str,
        rating: Option<u32>,
    ) -> Result<Arc<LoadedTable>, ApiError> {
        let date = storage::latest_date(&self.storage)?;
        let file = storage::stats_file(&self.storage, &date, format, rating)?;
        let key = (format.to_string(), file.rating);

        if let Some(cached) = self.tables.read().await.get(&key) {
            debug!("Usage table cache hit for {:?}", key);
            return Ok(Arc::clone(cached));
        }

        let table = storage::load_usage_table(&file.path)?;
        let loaded = Arc::new(LoadedTable { file, table });

        let mut tables = self.tables.write().await;
        let entry = tables.entry(key).or_insert_with(|| {
            info!("Cached usage table {:?}", loaded.file.path);
            Arc::clone(&loaded)
        });
        Ok(Arc::clone(entry))
    }
}
