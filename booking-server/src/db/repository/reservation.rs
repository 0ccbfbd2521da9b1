//! Reservation Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Reservation;
use crate::utils::time::now_micros;
use chrono::NaiveDate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "reservation";

/// Fields needed to insert a reservation row
#[derive(Debug, Clone)]
pub struct ReservationInsert {
    pub room: RecordId,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub event_type: String,
    pub guests: u32,
    pub status: String,
}

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid reservation ID: {}", id)))?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// All reservations for one room, newest first
    pub async fn find_by_room(&self, room_id: &str) -> RepoResult<Vec<Reservation>> {
        let rows: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE room = $room ORDER BY created_at DESC")
            .bind(("room", room_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// All reservations across a set of rooms (a manager's rooms), newest
    /// first
    pub async fn find_by_rooms(&self, room_ids: Vec<String>) -> RepoResult<Vec<Reservation>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE room IN $rooms ORDER BY created_at DESC")
            .bind(("rooms", room_ids))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Insert a new reservation row
    pub async fn create(&self, data: ReservationInsert) -> RepoResult<Reservation> {
        let reservation = Reservation {
            id: None,
            room: data.room,
            last_name: data.last_name,
            first_name: data.first_name,
            email: data.email,
            phone: data.phone,
            date: data.date,
            event_type: data.event_type,
            guests: data.guests,
            status: data.status,
            created_at: now_micros(),
        };

        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Overwrite the status field only
    pub async fn update_status(&self, id: &str, status: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid reservation ID: {}", id)))?;
        self.base
            .db()
            .query("UPDATE $thing SET status = $status")
            .bind(("thing", thing))
            .bind(("status", status.to_string()))
            .await?;
        Ok(())
    }
}
