//! Ownership Authorization Guard
//!
//! One reusable check: does this manager own the room a mutation targets?
//! The guard resolves ownership from current persisted state on every call.
//! Decisions are never cached, so a stale authorization can't be replayed
//! after a room changes hands.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::Room;
use crate::db::repository::RoomRepository;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct OwnershipGuard {
    rooms: RoomRepository,
}

impl OwnershipGuard {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            rooms: RoomRepository::new(db),
        }
    }

    /// Verify `manager_id` owns the room. Returns the room on success so
    /// callers don't re-fetch it.
    ///
    /// Any other outcome denies: unknown room → `NotFound`, owner mismatch →
    /// `Forbidden`. Denial happens before the caller performs any write.
    pub async fn ensure_room_owner(&self, room_id: &str, manager_id: &str) -> AppResult<Room> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

        if room.manager.to_string() != manager_id {
            return Err(AppError::Forbidden(
                "Not the manager of this room".to_string(),
            ));
        }

        Ok(room)
    }
}
