//! Booking Server - venue reservation backend
//!
//! # Architecture overview
//!
//! - **Reservation engine** (`reservations`): the status state machine:
//!   creation with capacity check and owner auto-confirmation, owner
//!   transitions, client proof uploads, append-only status history
//! - **Availability index** (`availability`): derived reserved/pending/
//!   blocked date sets per room
//! - **Ownership guard** (`auth`): JWT manager identity + per-call room
//!   ownership checks
//! - **Sync bus** (`sync`): best-effort cross-view calendar invalidation
//! - **Database** (`db`): embedded SurrealDB repositories
//! - **HTTP API** (`api`): axum routes and handlers
//!
//! # Module structure
//!
//! ```text
//! booking-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, extractors, ownership guard
//! ├── api/           # HTTP routes and handlers
//! ├── availability/  # derived calendar sets
//! ├── reservations/  # lifecycle state machine
//! ├── sync/          # calendar sync bus
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod availability;
pub mod core;
pub mod db;
pub mod reservations;
pub mod sync;
pub mod utils;

// Re-export common types
pub use auth::{AuthManager, JwtService, OwnershipGuard};
pub use availability::{AvailabilityIndex, AvailabilitySet};
pub use core::{Config, Server, ServerState};
pub use reservations::{CreateReservation, ReservationService, TransitionAction};
pub use sync::SyncBus;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
