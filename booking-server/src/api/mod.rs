//! API routing
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`rooms`] - room details and owner updates
//! - [`reservations`] - creation, transitions, history, proof uploads
//! - [`blocked_dates`] - administrative date holds
//! - [`payment_proofs`] - proof listings
//! - [`availability`] - derived calendar date sets
//! - [`sync`] - calendar sync polling fallback
//! - [`messages`] - requester/manager notes

pub mod availability;
pub mod blocked_dates;
pub mod health;
pub mod messages;
pub mod payment_proofs;
pub mod reservations;
pub mod rooms;
pub mod sync;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(rooms::router())
        .merge(reservations::router())
        .merge(blocked_dates::router())
        .merge(payment_proofs::router())
        .merge(availability::router())
        .merge(sync::router())
        .merge(messages::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
