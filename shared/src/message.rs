//! Calendar sync payloads
//!
//! Types carried on the cross-client sync bus. The bus moves invalidation
//! hints only: a consumer that receives one re-queries the availability
//! index rather than trusting any state inside the payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What changed for a room. Free-form tag rather than a closed enum so new
/// producers don't break old consumers.
pub mod actions {
    pub const RESERVATION_CREATED: &str = "reservation_created";
    pub const STATUS_CHANGED: &str = "status_changed";
    pub const PROOF_UPLOADED: &str = "proof_uploaded";
    pub const DATE_BLOCKED: &str = "date_blocked";
    pub const DATE_UNBLOCKED: &str = "date_unblocked";
    pub const ROOM_UPDATED: &str = "room_updated";
}

/// A "something changed for room X" notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarUpdate {
    /// Room whose calendar is stale.
    pub room_id: String,
    /// Change tag, see [`actions`].
    pub action: String,
    /// Reservation involved, when the change is reservation-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    /// Publish timestamp (unix millis), lets consumers discard stale
    /// fallback payloads.
    pub ts: i64,
    /// Unique id of this publication, for delivery-count accounting.
    pub update_id: Uuid,
}

impl CalendarUpdate {
    pub fn new(room_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            action: action.into(),
            reservation_id: None,
            ts: Utc::now().timestamp_millis(),
            update_id: Uuid::new_v4(),
        }
    }

    pub fn with_reservation(mut self, reservation_id: impl Into<String>) -> Self {
        self.reservation_id = Some(reservation_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_without_reservation_id_when_absent() {
        let update = CalendarUpdate::new("room:abc", actions::DATE_BLOCKED);
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("reservation_id").is_none());
        assert_eq!(json["room_id"], "room:abc");
        assert_eq!(json["action"], "date_blocked");
    }

    #[test]
    fn distinct_publications_get_distinct_ids() {
        let a = CalendarUpdate::new("room:abc", actions::STATUS_CHANGED);
        let b = CalendarUpdate::new("room:abc", actions::STATUS_CHANGED);
        assert_ne!(a.update_id, b.update_id);
    }
}
