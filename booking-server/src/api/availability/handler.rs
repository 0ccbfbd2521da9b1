//! Availability API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;

use crate::availability::{AvailabilityIndex, AvailabilitySet};
use crate::core::ServerState;
use crate::utils::{AppResult, ok};

/// GET /api/availability/{room_id} - the derived reserved/pending/blocked
/// date sets for calendar rendering. Always recomputed; never cached.
pub async fn for_room(
    State(state): State<ServerState>,
    Path(room_id): Path<String>,
) -> AppResult<Json<ApiResponse<AvailabilitySet>>> {
    let index = AvailabilityIndex::new(state.get_db());
    let set = index.for_room(&room_id).await;
    Ok(ok(set))
}
