//! Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use shared::ApiResponse;
use shared::message::{CalendarUpdate, actions};

use crate::auth::{AuthManager, OwnershipGuard};
use crate::core::ServerState;
use crate::db::models::{Room, RoomUpdate};
use crate::db::repository::RoomRepository;
use crate::utils::{AppError, AppResult, ok};

/// GET /api/rooms - rooms of the authenticated manager
pub async fn list_mine(
    State(state): State<ServerState>,
    manager: AuthManager,
) -> AppResult<Json<ApiResponse<Vec<Room>>>> {
    let rooms = RoomRepository::new(state.get_db())
        .find_by_manager(&manager.id)
        .await?;
    Ok(ok(rooms))
}

/// GET /api/rooms/{id} - public room details (pricing tiers included)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Room>>> {
    let room = RoomRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))?;
    Ok(ok(room))
}

/// PUT /api/rooms/{id} - owner-only field update; a `tarifs` array replaces
/// the whole pricing-tier list
pub async fn update(
    State(state): State<ServerState>,
    manager: AuthManager,
    Path(id): Path<String>,
    Json(payload): Json<RoomUpdate>,
) -> AppResult<Json<ApiResponse<Room>>> {
    let guard = OwnershipGuard::new(state.get_db());
    guard.ensure_room_owner(&id, &manager.id).await?;

    let room = RoomRepository::new(state.get_db())
        .update(&id, payload)
        .await?;

    state.broadcast_calendar(CalendarUpdate::new(id, actions::ROOM_UPDATED));

    Ok(ok(room))
}
