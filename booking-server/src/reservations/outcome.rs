//! Operation outcomes
//!
//! Lifecycle operations are two-phase: a primary durable write whose
//! success defines the outcome, plus best-effort secondary effects (history
//! append, account linkage, counterparty notification). A failed secondary
//! effect never unwinds the primary write; it is logged and surfaced as a
//! warning on the outcome so callers can tell "done" from "done, with
//! caveats".

use serde::Serialize;
use shared::ReservationStatus;

use crate::db::models::{PaymentProof, Reservation};

/// Client account touched during reservation creation
#[derive(Debug, Clone, Serialize)]
pub struct AccountSummary {
    pub id: String,
    pub email: Option<String>,
    /// Whether the account was created by this reservation (vs reused)
    pub created: bool,
}

/// Result of creating a reservation
#[derive(Debug, Serialize)]
pub struct CreateOutcome {
    pub reservation: Reservation,
    /// Linked client account, when the best-effort linkage succeeded
    pub account: Option<AccountSummary>,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Result of an owner status transition
#[derive(Debug, Serialize)]
pub struct TransitionOutcome {
    pub reservation: Reservation,
    pub old_status: String,
    pub new_status: ReservationStatus,
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Result of a client payment-proof upload
#[derive(Debug, Serialize)]
pub struct ProofOutcome {
    pub reservation: Reservation,
    pub proof: PaymentProof,
    #[serde(skip)]
    pub warnings: Vec<String>,
}
