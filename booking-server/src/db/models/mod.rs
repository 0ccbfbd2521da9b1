//! Database Models
//!
//! Entity structs persisted in SurrealDB, with the serde helpers that keep
//! record ids readable as "table:id" strings at the API boundary.

pub mod serde_helpers;

pub mod account;
pub mod blocked_date;
pub mod message;
pub mod reservation;
pub mod room;

pub use account::Account;
pub use blocked_date::BlockedDate;
pub use message::{Message, SenderKind};
pub use reservation::{PaymentProof, Reservation, StatusHistoryEntry};
pub use room::{PricingTier, Room, RoomCreate, RoomUpdate};
