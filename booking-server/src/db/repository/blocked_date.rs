//! Blocked Date Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::BlockedDate;
use crate::utils::time::now_micros;
use chrono::NaiveDate;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "blocked_date";

#[derive(Clone)]
pub struct BlockedDateRepository {
    base: BaseRepository,
}

impl BlockedDateRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find blocked date by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<BlockedDate>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid blocked-date ID: {}", id)))?;
        let entry: Option<BlockedDate> = self.base.db().select(thing).await?;
        Ok(entry)
    }

    /// All blocked dates of one room, ordered by date
    pub async fn find_by_room(&self, room_id: &str) -> RepoResult<Vec<BlockedDate>> {
        let rows: Vec<BlockedDate> = self
            .base
            .db()
            .query("SELECT * FROM blocked_date WHERE room = $room ORDER BY date")
            .bind(("room", room_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// All blocked dates across a set of rooms (a manager's rooms)
    pub async fn find_by_rooms(&self, room_ids: Vec<String>) -> RepoResult<Vec<BlockedDate>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<BlockedDate> = self
            .base
            .db()
            .query("SELECT * FROM blocked_date WHERE room IN $rooms ORDER BY date")
            .bind(("rooms", room_ids))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Create an administrative hold on a date
    pub async fn create(
        &self,
        room: RecordId,
        date: NaiveDate,
        reason: Option<String>,
        created_by: RecordId,
    ) -> RepoResult<BlockedDate> {
        let entry = BlockedDate {
            id: None,
            room,
            date,
            reason,
            created_by,
            created_at: now_micros(),
        };

        let created: Option<BlockedDate> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create blocked date".to_string()))
    }

    /// Hard delete a blocked date
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid blocked-date ID: {}", id)))?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
