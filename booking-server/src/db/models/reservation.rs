//! Reservation Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation entity
///
/// `status` stays a raw string in storage: rows written before the current
/// vocabulary carry legacy tokens (`en_attente`, `nouveau`, ...) and must
/// keep classifying. Parsing to the canonical enum happens at use sites via
/// `shared::ReservationStatus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    pub last_name: String,
    pub first_name: String,
    /// Optional; stored as empty string when the requester gave none
    #[serde(default)]
    pub email: String,
    pub phone: String,
    /// Requested calendar day
    pub date: NaiveDate,
    pub event_type: String,
    pub guests: u32,
    pub status: String,
    /// Unix timestamp micros
    pub created_at: i64,
}

/// Status history entry: append-only audit of every transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub reservation: RecordId,
    pub old_status: Option<String>,
    pub new_status: String,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub changed_by: Option<RecordId>,
    pub comment: Option<String>,
    /// Unix timestamp micros
    pub changed_at: i64,
}

/// Payment proof entry: append-only; the newest row is the current proof
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentProof {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub reservation: RecordId,
    /// Relative file reference (e.g. "uploads/payments/...")
    pub path: String,
    /// Unix timestamp micros
    pub uploaded_at: i64,
}
