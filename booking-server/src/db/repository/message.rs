//! Message Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Message, SenderKind};
use crate::utils::time::now_micros;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "message";

#[derive(Clone)]
pub struct MessageRepository {
    base: BaseRepository,
}

impl MessageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a message row
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        reservation: Option<RecordId>,
        room: Option<RecordId>,
        sender_kind: SenderKind,
        sender: Option<RecordId>,
        subject: String,
        body: String,
    ) -> RepoResult<Message> {
        let message = Message {
            id: None,
            reservation,
            room,
            sender_kind,
            sender,
            subject,
            body,
            read: false,
            created_at: now_micros(),
        };

        let created: Option<Message> = self.base.db().create(TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create message".to_string()))
    }

    /// Messages attached to one reservation, oldest first
    pub async fn find_by_reservation(&self, reservation_id: &str) -> RepoResult<Vec<Message>> {
        let rows: Vec<Message> = self
            .base
            .db()
            .query(
                "SELECT * FROM message WHERE reservation = $reservation ORDER BY created_at",
            )
            .bind(("reservation", reservation_id.to_string()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Messages across a set of rooms (a manager's rooms), oldest first
    pub async fn find_by_rooms(&self, room_ids: Vec<String>) -> RepoResult<Vec<Message>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<Message> = self
            .base
            .db()
            .query("SELECT * FROM message WHERE room IN $rooms ORDER BY created_at")
            .bind(("rooms", room_ids))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
