//! Room Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Room, RoomCreate, RoomUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "room";

#[derive(Clone)]
pub struct RoomRepository {
    base: BaseRepository,
}

impl RoomRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find room by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Room>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid room ID: {}", id)))?;
        let room: Option<Room> = self.base.db().select(thing).await?;
        Ok(room)
    }

    /// Find all rooms owned by a manager
    pub async fn find_by_manager(&self, manager_id: &str) -> RepoResult<Vec<Room>> {
        let rooms: Vec<Room> = self
            .base
            .db()
            .query("SELECT * FROM room WHERE manager = $manager ORDER BY name")
            .bind(("manager", manager_id.to_string()))
            .await?
            .take(0)?;
        Ok(rooms)
    }

    /// Ids of the rooms owned by a manager, for scoping joined listings
    pub async fn ids_by_manager(&self, manager_id: &str) -> RepoResult<Vec<String>> {
        let rooms = self.find_by_manager(manager_id).await?;
        Ok(rooms
            .into_iter()
            .filter_map(|r| r.id.map(|id| id.to_string()))
            .collect())
    }

    /// Create a new room
    pub async fn create(&self, data: RoomCreate) -> RepoResult<Room> {
        let room = Room {
            id: None,
            name: data.name,
            address: data.address,
            manager: data.manager,
            capacity: data.capacity,
            description: data.description,
            phone: None,
            phone_secondary: None,
            opens_at: None,
            closes_at: None,
            tarifs: data.tarifs,
            services: data.services,
        };

        let created: Option<Room> = self.base.db().create(TABLE).content(room).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create room".to_string()))
    }

    /// Update a room; `tarifs`, when present, replaces the whole tier list
    /// (the legacy schema's delete-and-reinsert strategy)
    pub async fn update(&self, id: &str, data: RoomUpdate) -> RepoResult<Room> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid room ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))?;

        // Build the UPDATE manually so link fields keep their stored shape
        let name = data.name.unwrap_or(existing.name);
        let address = data.address.or(existing.address);
        let capacity = data.capacity.unwrap_or(existing.capacity);
        let description = data.description.or(existing.description);
        let phone = data.phone.or(existing.phone);
        let phone_secondary = data.phone_secondary.or(existing.phone_secondary);
        let opens_at = data.opens_at.or(existing.opens_at);
        let closes_at = data.closes_at.or(existing.closes_at);
        let tarifs = data.tarifs.unwrap_or(existing.tarifs);
        let services = data.services.unwrap_or(existing.services);

        self.base
            .db()
            .query(
                "UPDATE $thing SET name = $name, address = $address, capacity = $capacity, \
                 description = $description, phone = $phone, phone_secondary = $phone_secondary, \
                 opens_at = $opens_at, closes_at = $closes_at, tarifs = $tarifs, \
                 services = $services",
            )
            .bind(("thing", thing))
            .bind(("name", name))
            .bind(("address", address))
            .bind(("capacity", capacity))
            .bind(("description", description))
            .bind(("phone", phone))
            .bind(("phone_secondary", phone_secondary))
            .bind(("opens_at", opens_at))
            .bind(("closes_at", closes_at))
            .bind(("tarifs", tarifs))
            .bind(("services", services))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Room {} not found", id)))
    }
}
