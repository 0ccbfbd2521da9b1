//! Message API Handlers
//!
//! Thin surface over the messaging collaborator: clients and managers leave
//! human-readable notes on a reservation or room. Manager sends are
//! ownership-guarded; client sends are open, like the reservation request
//! itself.

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;

use shared::ApiResponse;

use crate::auth::{AuthManager, MaybeManager, OwnershipGuard};
use crate::core::ServerState;
use crate::db::models::{Message, SenderKind};
use crate::db::repository::{MessageRepository, RoomRepository};
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub reservation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub reservation_id: Option<String>,
    pub room_id: Option<String>,
    pub sender_kind: SenderKind,
    pub subject: String,
    pub body: String,
}

/// GET /api/messages - messages of one reservation, or of every room the
/// authenticated manager owns
pub async fn list(
    State(state): State<ServerState>,
    MaybeManager(manager): MaybeManager,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Message>>>> {
    let repo = MessageRepository::new(state.get_db());

    if let Some(reservation_id) = params.reservation_id {
        let rows = repo.find_by_reservation(&reservation_id).await?;
        return Ok(ok(rows));
    }

    let manager = manager.ok_or(AppError::Unauthorized)?;
    let room_ids = RoomRepository::new(state.get_db())
        .ids_by_manager(&manager.id)
        .await?;
    let rows = repo.find_by_rooms(room_ids).await?;
    Ok(ok(rows))
}

/// POST /api/messages - leave a note
pub async fn create(
    State(state): State<ServerState>,
    MaybeManager(manager): MaybeManager,
    Json(payload): Json<CreateMessageRequest>,
) -> AppResult<Json<ApiResponse<Message>>> {
    if payload.subject.trim().is_empty() || payload.body.trim().is_empty() {
        return Err(AppError::Validation(
            "subject and body are required".to_string(),
        ));
    }

    // A note sent as manager must come from the room's actual owner
    let sender = match payload.sender_kind {
        SenderKind::Manager => {
            let manager: AuthManager = manager.ok_or(AppError::Unauthorized)?;
            let room_id = payload
                .room_id
                .as_deref()
                .ok_or_else(|| AppError::Validation("room_id is required".to_string()))?;
            OwnershipGuard::new(state.get_db())
                .ensure_room_owner(room_id, &manager.id)
                .await?;
            manager.id.parse().ok()
        }
        SenderKind::Client => None,
    };

    let reservation = payload
        .reservation_id
        .map(|id| {
            id.parse()
                .map_err(|_| AppError::Validation(format!("Invalid reservation ID: {}", id)))
        })
        .transpose()?;
    let room = payload
        .room_id
        .map(|id| {
            id.parse()
                .map_err(|_| AppError::Validation(format!("Invalid room ID: {}", id)))
        })
        .transpose()?;

    let message = MessageRepository::new(state.get_db())
        .create(
            reservation,
            room,
            payload.sender_kind,
            sender,
            payload.subject,
            payload.body,
        )
        .await?;

    Ok(ok(message))
}
