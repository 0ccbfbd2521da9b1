//! Payment Proof API Handlers

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;

use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::models::PaymentProof;
use crate::db::repository::{PaymentProofRepository, ReservationRepository};
use crate::utils::{AppError, AppResult, ok};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub reservation_id: Option<String>,
    pub room_id: Option<String>,
}

/// GET /api/payment-proofs - proofs for one reservation, or for every
/// reservation of a room (joined through the reservation), newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<ApiResponse<Vec<PaymentProof>>>> {
    let repo = PaymentProofRepository::new(state.get_db());

    if let Some(reservation_id) = params.reservation_id {
        let rows = repo.find_by_reservation(&reservation_id).await?;
        return Ok(ok(rows));
    }

    if let Some(room_id) = params.room_id {
        let reservation_ids: Vec<String> = ReservationRepository::new(state.get_db())
            .find_by_room(&room_id)
            .await?
            .into_iter()
            .filter_map(|r| r.id.map(|id| id.to_string()))
            .collect();
        let rows = repo.find_by_reservations(reservation_ids).await?;
        return Ok(ok(rows));
    }

    Err(AppError::Validation(
        "reservation_id or room_id is required".to_string(),
    ))
}
