//! Transition actions
//!
//! Wire-level action tokens a room owner can apply to a reservation, and
//! the states each action is legal from. Unknown tokens are an error,
//! never silently ignored.

use shared::ReservationStatus;

use crate::utils::AppError;

/// An owner-initiated status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionAction {
    /// `accept`: take the request, typically paired with asking for a
    /// payment proof
    Accept,
    /// `reject`
    Reject,
    /// `cancel`
    Cancel,
    /// `pending`: reset an in-flight reservation back to the entry state
    Reset,
    /// `confirm` / `confirm_payment`: confirmed occupancy
    Confirm,
    /// `invalidate_proof`: the uploaded proof is unusable, the client must
    /// re-upload
    InvalidateProof,
}

impl TransitionAction {
    /// Parse a wire token
    pub fn parse(token: &str) -> Result<Self, AppError> {
        match token {
            "accept" => Ok(TransitionAction::Accept),
            "reject" => Ok(TransitionAction::Reject),
            "cancel" => Ok(TransitionAction::Cancel),
            "pending" => Ok(TransitionAction::Reset),
            "confirm" | "confirm_payment" => Ok(TransitionAction::Confirm),
            "invalidate_proof" => Ok(TransitionAction::InvalidateProof),
            _ => Err(AppError::InvalidAction(token.to_string())),
        }
    }

    /// Status this action moves a reservation to
    pub fn target(&self) -> ReservationStatus {
        match self {
            TransitionAction::Accept => ReservationStatus::Accepted,
            TransitionAction::Reject => ReservationStatus::Rejected,
            TransitionAction::Cancel => ReservationStatus::Cancelled,
            TransitionAction::Reset => ReservationStatus::Pending,
            TransitionAction::Confirm => ReservationStatus::Confirmed,
            TransitionAction::InvalidateProof => ReservationStatus::ProofInvalid,
        }
    }

    /// Whether this action is legal from `from`
    pub fn allowed_from(&self, from: ReservationStatus) -> bool {
        match self {
            TransitionAction::Accept => from == ReservationStatus::Pending,
            TransitionAction::Reject | TransitionAction::Cancel | TransitionAction::Reset => {
                !from.is_terminal()
            }
            TransitionAction::Confirm => matches!(
                from,
                ReservationStatus::Pending
                    | ReservationStatus::Accepted
                    | ReservationStatus::ProofUploaded
            ),
            TransitionAction::InvalidateProof => from == ReservationStatus::ProofUploaded,
        }
    }
}

/// States a client may upload a payment proof from
pub fn proof_upload_allowed_from(from: ReservationStatus) -> bool {
    matches!(
        from,
        ReservationStatus::Accepted | ReservationStatus::ProofInvalid
    )
}
