use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, collect};
use crate::models::{LeaderboardEntry, PokemonStats};
use crate::slug_to_name;

use super::RatingParams;

const DEFAULT_LEADERBOARD_SIZE: usize = 50;
const MAX_LEADERBOARD_SIZE: usize = 500;

#[derive(Debug, Serialize)]
pub struct PokemonResponse {
    #[serde(flatten)]
    pub stats: PokemonStats,
    pub rating: u32,
}

/// Composite record for one Pokémon. Dashes in the path read as spaces.
pub async fn pokemon_stats(
    State(state): State<AppState>,
    Path((format_id, name)): Path<(String, String)>,
    Query(params): Query<RatingParams>,
) -> Result<Json<PokemonResponse>, ApiError> {
    let loaded = state.usage_table(&format_id, params.rating).await?;
    let search_name = slug_to_name(&name);

    let stats = collect(&search_name, &loaded.table, &state.metadata)
        .ok_or_else(|| ApiError::NotFound(format!("Pokémon '{}' in {}", name, format_id)))?;
    debug!("Resolved '{}' to {} in {}", name, stats.name, format_id);

    Ok(Json(PokemonResponse {
        stats,
        rating: loaded.rating(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub rating: Option<u32>,
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub format: String,
    pub rating: u32,
    pub entries: Vec<LeaderboardEntry>,
}

/// Most common counters in a format.
pub async fn leaderboard(
    State(state): State<AppState>,
    Path(format_id): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let top = params.top.unwrap_or(DEFAULT_LEADERBOARD_SIZE);
    if top == 0 || top > MAX_LEADERBOARD_SIZE {
        return Err(ApiError::BadRequest(format!(
            "top must be between 1 and {}",
            MAX_LEADERBOARD_SIZE
        )));
    }

    let loaded = state.usage_table(&format_id, params.rating).await?;
    let mut entries = calculate::leaderboard(&loaded.table);
    entries.truncate(top);

    Ok(Json(LeaderboardResponse {
        format: state.metadata.format_name(&format_id).to_string(),
        rating: loaded.rating(),
        entries,
    }))
}
