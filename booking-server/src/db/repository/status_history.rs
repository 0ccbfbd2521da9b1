//! Status History Repository
//!
//! Append-only: rows are inserted and listed, never updated or deleted.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::StatusHistoryEntry;
use crate::utils::time::now_micros;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "status_history";

#[derive(Clone)]
pub struct StatusHistoryRepository {
    base: BaseRepository,
}

impl StatusHistoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append one transition row
    pub async fn append(
        &self,
        reservation: RecordId,
        old_status: Option<&str>,
        new_status: &str,
        changed_by: Option<RecordId>,
        comment: Option<String>,
    ) -> RepoResult<StatusHistoryEntry> {
        let entry = StatusHistoryEntry {
            id: None,
            reservation,
            old_status: old_status.map(|s| s.to_string()),
            new_status: new_status.to_string(),
            changed_by,
            comment,
            changed_at: now_micros(),
        };

        let created: Option<StatusHistoryEntry> =
            self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to append history entry".to_string()))
    }

    /// Full history of one reservation, oldest first
    pub async fn find_by_reservation(
        &self,
        reservation_id: &str,
    ) -> RepoResult<Vec<StatusHistoryEntry>> {
        let rows: Vec<StatusHistoryEntry> = self
            .base
            .db()
            .query(
                "SELECT * FROM status_history WHERE reservation = $reservation \
                 ORDER BY changed_at ASC",
            )
            .bind(("reservation", reservation_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
