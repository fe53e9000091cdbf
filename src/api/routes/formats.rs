use axum::extract::{Path, Query, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::format_index as build_format_index;
use crate::models::{FormatIndex, FormatSummary};
use crate::storage::{self, StorageError};

use super::RatingParams;

/// Formats available in the latest month, newest generation first.
pub async fn list_formats(
    State(state): State<AppState>,
) -> Result<Json<Vec<FormatSummary>>, ApiError> {
    let date = match storage::latest_date(&state.storage) {
        Ok(date) => date,
        Err(StorageError::NoDateDirectory(_)) => return Ok(Json(Vec::new())),
        Err(e) => return Err(e.into()),
    };

    let formats = storage::list_formats(&state.storage, &date)?
        .into_iter()
        .map(|id| FormatSummary {
            name: state.metadata.format_name(&id).to_string(),
            id,
        })
        .collect();

    Ok(Json(formats))
}

pub async fn format_ratings(
    State(state): State<AppState>,
    Path(format_id): Path<String>,
) -> Result<Json<Vec<u32>>, ApiError> {
    let date = match storage::latest_date(&state.storage) {
        Ok(date) => date,
        Err(StorageError::NoDateDirectory(_)) => return Ok(Json(Vec::new())),
        Err(e) => return Err(e.into()),
    };

    Ok(Json(storage::list_ratings(
        &state.storage,
        &date,
        &format_id,
    )?))
}

/// Ranked usage list for a format. `format` carries the display name.
pub async fn format_index(
    State(state): State<AppState>,
    Path(format_id): Path<String>,
    Query(params): Query<RatingParams>,
) -> Result<Json<FormatIndex>, ApiError> {
    let loaded = state.usage_table(&format_id, params.rating).await?;
    let display_name = state.metadata.format_name(&format_id);

    Ok(Json(build_format_index(
        display_name,
        loaded.rating(),
        &loaded.table,
    )))
}
