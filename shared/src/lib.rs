//! Shared types for the booking platform
//!
//! Wire-level types used by the server and by clients/tests: the canonical
//! reservation status vocabulary, calendar sync payloads, and the unified
//! API response envelope.

pub mod message;
pub mod response;
pub mod status;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use message::CalendarUpdate;
pub use response::{API_CODE_SUCCESS, ApiResponse};
pub use status::{AvailabilityBucket, ReservationStatus, classify_status};
