//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables.

pub mod account;
pub mod blocked_date;
pub mod message;
pub mod payment_proof;
pub mod reservation;
pub mod room;
pub mod status_history;

// Re-exports
pub use account::AccountRepository;
pub use blocked_date::BlockedDateRepository;
pub use message::MessageRepository;
pub use payment_proof::PaymentProofRepository;
pub use reservation::ReservationRepository;
pub use room::RoomRepository;
pub use status_history::StatusHistoryRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
