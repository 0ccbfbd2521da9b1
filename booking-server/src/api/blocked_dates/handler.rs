//! Blocked Date API Handlers
//!
//! Administrative holds on room dates. Create/delete are owner-only and
//! ownership-checked against current persisted state on every call.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;

use shared::ApiResponse;
use shared::message::{CalendarUpdate, actions};

use crate::auth::{AuthManager, MaybeManager, OwnershipGuard};
use crate::core::ServerState;
use crate::db::models::BlockedDate;
use crate::db::repository::{BlockedDateRepository, RoomRepository};
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub room_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateBlockedDateRequest {
    pub room_id: String,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// GET /api/blocked-dates - list holds
///
/// `?room_id=` scopes to one room (public calendar data); without it the
/// caller must be an authenticated manager and gets the holds across every
/// room they own.
pub async fn list(
    State(state): State<ServerState>,
    MaybeManager(manager): MaybeManager,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<BlockedDate>>>> {
    let repo = BlockedDateRepository::new(state.get_db());

    if let Some(room_id) = params.room_id {
        let rows = repo.find_by_room(&room_id).await?;
        return Ok(ok(rows));
    }

    let manager = manager.ok_or(AppError::Unauthorized)?;
    let room_ids = RoomRepository::new(state.get_db())
        .ids_by_manager(&manager.id)
        .await?;
    let rows = repo.find_by_rooms(room_ids).await?;
    Ok(ok(rows))
}

/// POST /api/blocked-dates - owner creates a hold
pub async fn create(
    State(state): State<ServerState>,
    manager: AuthManager,
    Json(payload): Json<CreateBlockedDateRequest>,
) -> AppResult<Json<ApiResponse<BlockedDate>>> {
    let guard = OwnershipGuard::new(state.get_db());
    let room = guard.ensure_room_owner(&payload.room_id, &manager.id).await?;

    let room_record = room
        .id
        .ok_or_else(|| AppError::Internal("room has no id".to_string()))?;
    let room_id = room_record.to_string();
    let created_by = manager
        .id
        .parse()
        .map_err(|_| AppError::Validation(format!("Invalid manager ID: {}", manager.id)))?;

    let entry = BlockedDateRepository::new(state.get_db())
        .create(room_record, payload.date, payload.reason, created_by)
        .await?;

    state.broadcast_calendar(CalendarUpdate::new(room_id, actions::DATE_BLOCKED));

    Ok(ok(entry))
}

/// DELETE /api/blocked-dates/{id} - owner removes a hold
pub async fn delete(
    State(state): State<ServerState>,
    manager: AuthManager,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = BlockedDateRepository::new(state.get_db());
    let entry = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Blocked date {} not found", id)))?;

    // ownership of the hold follows the room it belongs to
    let guard = OwnershipGuard::new(state.get_db());
    let room_id = entry.room.to_string();
    guard.ensure_room_owner(&room_id, &manager.id).await?;

    let result = repo.delete(&id).await?;

    state.broadcast_calendar(CalendarUpdate::new(room_id, actions::DATE_UNBLOCKED));

    Ok(ok(result))
}
