//! Sync API Handlers
//!
//! Polling fallback of the calendar sync bus: consumers that missed (or
//! predate) a broadcast fetch the latest payload here on their poll
//! interval and on focus regain.

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;

use shared::{ApiResponse, CalendarUpdate};

use crate::core::ServerState;
use crate::utils::{AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub room_id: String,
}

/// GET /api/sync/calendar?room_id= - latest invalidation payload for a room
/// (`data: null` when nothing was ever published)
pub async fn latest(
    State(state): State<ServerState>,
    Query(params): Query<LatestParams>,
) -> AppResult<Json<ApiResponse<Option<CalendarUpdate>>>> {
    Ok(ok(state.sync_bus.latest(&params.room_id)))
}
