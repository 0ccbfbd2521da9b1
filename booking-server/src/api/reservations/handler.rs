//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::ApiResponse;

use crate::auth::{AuthManager, MaybeManager};
use crate::core::ServerState;
use crate::db::models::{Reservation, StatusHistoryEntry};
use crate::db::repository::{ReservationRepository, RoomRepository};
use crate::reservations::service::CreateReservation;
use crate::reservations::{CreateOutcome, ReservationService};
use crate::utils::{AppError, AppResult, ok, ok_with_warnings};

/// POST /api/reservations request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1))]
    pub room_id: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone: String,
    pub date: NaiveDate,
    #[validate(length(min = 1))]
    pub event_type: String,
    pub guests: u32,
    /// Lets the requester log in later with email/phone + password
    #[validate(length(min = 4))]
    pub password: String,
}

/// POST /api/reservations/{id}/status request body
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub action: String,
    pub comment: Option<String>,
}

/// POST /api/reservations/{id}/proof request body
///
/// Carries the file reference only; the upload bytes travel through the
/// static-file collaborator, which is outside this service.
#[derive(Debug, Deserialize, Validate)]
pub struct ProofUploadRequest {
    #[validate(length(min = 1))]
    pub file_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub room_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub reservation: Reservation,
    pub old_status: String,
    pub new_status: shared::ReservationStatus,
}

/// POST /api/reservations - create a reservation
///
/// Anonymous requests enter at `pending`; a request authenticated as the
/// room's own manager is confirmed at creation.
pub async fn create(
    State(state): State<ServerState>,
    MaybeManager(manager): MaybeManager,
    Json(payload): Json<CreateReservationRequest>,
) -> AppResult<Json<ApiResponse<CreateOutcome>>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ReservationService::new(state.get_db(), state.sync_bus.clone());
    let outcome = service
        .create(
            CreateReservation {
                room_id: payload.room_id,
                last_name: payload.last_name,
                first_name: payload.first_name,
                email: payload.email,
                phone: payload.phone,
                date: payload.date,
                event_type: payload.event_type,
                guests: payload.guests,
                password: payload.password,
            },
            manager.as_ref(),
        )
        .await?;

    let warnings = outcome.warnings.clone();
    Ok(ok_with_warnings(outcome, warnings))
}

/// GET /api/reservations - list reservations
///
/// `?room_id=` scopes to one room (public calendar data); without it the
/// caller must be an authenticated manager and gets the reservations of
/// every room they own.
pub async fn list(
    State(state): State<ServerState>,
    MaybeManager(manager): MaybeManager,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<Reservation>>>> {
    let repo = ReservationRepository::new(state.get_db());

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

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Reservation>>> {
    let reservation = ReservationRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;
    Ok(ok(reservation))
}

/// POST /api/reservations/{id}/status - owner status transition
pub async fn update_status(
    State(state): State<ServerState>,
    manager: AuthManager,
    Path(id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<TransitionResponse>>> {
    let service = ReservationService::new(state.get_db(), state.sync_bus.clone());
    let outcome = service
        .transition(&id, &payload.action, payload.comment, &manager)
        .await?;

    let warnings = outcome.warnings.clone();
    Ok(ok_with_warnings(
        TransitionResponse {
            reservation: outcome.reservation,
            old_status: outcome.old_status,
            new_status: outcome.new_status,
        },
        warnings,
    ))
}

/// GET /api/reservations/{id}/history - status history, oldest first
pub async fn history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<StatusHistoryEntry>>>> {
    let service = ReservationService::new(state.get_db(), state.sync_bus.clone());
    let entries = service.status_history(&id).await?;
    Ok(ok(entries))
}

/// POST /api/reservations/{id}/proof - client payment-proof upload
pub async fn upload_proof(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProofUploadRequest>,
) -> AppResult<Json<ApiResponse<crate::reservations::ProofOutcome>>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = ReservationService::new(state.get_db(), state.sync_bus.clone());
    let outcome = service.upload_proof(&id, &payload.file_name).await?;

    let warnings = outcome.warnings.clone();
    Ok(ok_with_warnings(outcome, warnings))
}
