//! Server state
//!
//! [`ServerState`] holds the shared service handles every handler needs:
//! the embedded database, the calendar sync bus, and the JWT service. All
//! fields are cheap to clone (`Arc` or handle types).

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::CalendarUpdate;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::sync::SyncBus;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Calendar sync bus
    pub sync_bus: SyncBus,
    /// JWT service (shared ownership)
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: Surreal<Db>, sync_bus: SyncBus) -> Self {
        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        Self {
            config,
            db,
            sync_bus,
            jwt_service,
        }
    }

    /// Initialize the server state: work dir, database, services.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened; the server is useless
    /// without it.
    pub async fn initialize(config: &Config) -> Self {
        let db_dir = config.database_dir();
        std::fs::create_dir_all(&db_dir).expect("Failed to create database directory");
        let db_path = db_dir.join("booking.db");

        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");

        Self::new(config.clone(), db_service.db, SyncBus::new())
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Broadcast a calendar invalidation to every open view.
    ///
    /// Best-effort by design: a missed notification degrades to polling,
    /// never to an error.
    pub fn broadcast_calendar(&self, update: CalendarUpdate) {
        self.sync_bus.publish(update);
    }
}
