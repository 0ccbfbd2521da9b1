//! Unified Error Handling
//!
//! Provides the application error enum and its HTTP mapping. The `code`
//! field of the response envelope carries the error taxonomy consumed by
//! clients: `validation_error`, `not_found`, `authorization_denied`,
//! `invalid_action`, `invalid_transition`, `capacity_exceeded`,
//! `persistence_error`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    // ========== Business Logic Errors ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown action: {0}")]
    InvalidAction(String),

    #[error("Cannot apply '{action}' to a reservation in status '{from}'")]
    InvalidTransition { from: String, action: String },

    #[error("Guest count {requested} exceeds room capacity {capacity}")]
    CapacityExceeded { requested: u32, capacity: u32 },

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Taxonomy code exposed on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::Forbidden(_) => "authorization_denied",
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidAction(_) => "invalid_action",
            AppError::InvalidTransition { .. } => "invalid_transition",
            AppError::CapacityExceeded { .. } => "capacity_exceeded",
            AppError::Database(_) => "persistence_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Authentication errors (401)
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Please login first".to_string()),
            AppError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),

            // Authorization errors (403)
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidAction(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::CapacityExceeded { .. } => (StatusCode::BAD_REQUEST, self.to_string()),

            // Business rule (422)
            AppError::InvalidTransition { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }

            // Database errors (500): log detail, keep the message generic
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(self.code(), message));
        (status, body).into_response()
    }
}

impl From<crate::db::repository::RepoError> for AppError {
    fn from(e: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_codes_match_the_wire_contract() {
        assert_eq!(AppError::Validation("x".into()).code(), "validation_error");
        assert_eq!(AppError::NotFound("x".into()).code(), "not_found");
        assert_eq!(AppError::Forbidden("x".into()).code(), "authorization_denied");
        assert_eq!(AppError::InvalidAction("x".into()).code(), "invalid_action");
        assert_eq!(
            AppError::CapacityExceeded { requested: 5, capacity: 4 }.code(),
            "capacity_exceeded"
        );
        assert_eq!(AppError::Database("x".into()).code(), "persistence_error");
    }
}
