//! Room Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A pricing tier: one price applying to a set of weekdays
/// (e.g. week vs weekend rates).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingTier {
    /// Tier label ("semaine", "weekend", ...)
    pub kind: String,
    pub price: f64,
    /// Lowercase weekday names this tier applies to
    #[serde(default)]
    pub weekdays: Vec<String>,
}

/// Room entity (salle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    pub address: Option<String>,
    /// Owning manager; sole authorized mutator of this room
    #[serde(with = "serde_helpers::record_id")]
    pub manager: RecordId,
    pub capacity: u32,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub phone_secondary: Option<String>,
    /// Opening hours, "HH:MM"
    pub opens_at: Option<String>,
    pub closes_at: Option<String>,
    #[serde(default)]
    pub tarifs: Vec<PricingTier>,
    /// Services offered with the room (catering, sound system, ...)
    #[serde(default)]
    pub services: Vec<String>,
}

/// Create room payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomCreate {
    pub name: String,
    pub address: Option<String>,
    #[serde(with = "serde_helpers::record_id")]
    pub manager: RecordId,
    pub capacity: u32,
    pub description: Option<String>,
    #[serde(default)]
    pub tarifs: Vec<PricingTier>,
    #[serde(default)]
    pub services: Vec<String>,
}

/// Update room payload; `tarifs` replaces the whole tier list when present
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tarifs: Option<Vec<PricingTier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}
