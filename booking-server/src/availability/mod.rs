//! Availability Index
//!
//! Derives, for one room, which calendar dates are reserved, pending, or
//! administratively blocked. Recomputed from current persisted state on
//! every query; the whole point is real-time accuracy against concurrent
//! writers, so nothing here is cached.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use shared::{AvailabilityBucket, classify_status};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{BlockedDateRepository, ReservationRepository};

/// The three derived date sets of a room's calendar
#[derive(Debug, Default, Clone, Serialize)]
pub struct AvailabilitySet {
    /// Dates held by a confirmed reservation
    pub reserved: BTreeSet<NaiveDate>,
    /// Dates held by a reservation still in flight
    pub pending: BTreeSet<NaiveDate>,
    /// Dates under an administrative hold
    pub blocked: BTreeSet<NaiveDate>,
}

/// Read-only index over reservations and blocked dates
#[derive(Clone)]
pub struct AvailabilityIndex {
    reservations: ReservationRepository,
    blocked: BlockedDateRepository,
}

impl AvailabilityIndex {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            blocked: BlockedDateRepository::new(db),
        }
    }

    /// Compute the date sets for one room.
    ///
    /// Infallible by design: a read failure degrades the calendar to "no
    /// information" (empty sets) instead of erroring. The failure is logged
    /// for operators.
    pub async fn for_room(&self, room_id: &str) -> AvailabilitySet {
        let mut set = AvailabilitySet::default();

        match self.reservations.find_by_room(room_id).await {
            Ok(rows) => {
                for reservation in rows {
                    match classify_status(&reservation.status) {
                        AvailabilityBucket::Reserved => {
                            set.reserved.insert(reservation.date);
                        }
                        AvailabilityBucket::Pending => {
                            set.pending.insert(reservation.date);
                        }
                        AvailabilityBucket::Neither => {}
                    }
                }
            }
            Err(e) => {
                tracing::error!(room = %room_id, error = %e, "availability: reservation read failed");
                return AvailabilitySet::default();
            }
        }

        match self.blocked.find_by_room(room_id).await {
            Ok(rows) => {
                for entry in rows {
                    set.blocked.insert(entry.date);
                }
            }
            Err(e) => {
                tracing::error!(room = %room_id, error = %e, "availability: blocked-date read failed");
                return AvailabilitySet::default();
            }
        }

        set
    }
}
