//! Message Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderKind {
    Client,
    Manager,
}

/// A note between a requester and a room manager, usually attached to a
/// reservation (proof uploaded, proof invalidated, free-form question)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub reservation: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub room: Option<RecordId>,
    pub sender_kind: SenderKind,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub sender: Option<RecordId>,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    /// Unix timestamp micros
    pub created_at: i64,
}
