//! Blocked Date Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// An administrative hold on a room date, independent of any reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedDate {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub room: RecordId,
    pub date: NaiveDate,
    pub reason: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub created_by: RecordId,
    /// Unix timestamp micros
    pub created_at: i64,
}
