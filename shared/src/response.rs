//! API Response types
//!
//! Standardized response envelope shared by the server and its clients.

use serde::{Deserialize, Serialize};

/// Standard API response code for success
pub const API_CODE_SUCCESS: &str = "ok";

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": "ok",
///     "message": "Success",
///     "data": { ... }
/// }
/// ```
///
/// Error responses carry a taxonomy code (`validation_error`, `not_found`,
/// `authorization_denied`, `invalid_action`, `capacity_exceeded`,
/// `persistence_error`, ...) and no `data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code ("ok" = success, others = error taxonomy codes)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Non-fatal warnings from best-effort secondary effects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: "Success".to_string(),
            data: Some(data),
            warnings: Vec::new(),
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            code: API_CODE_SUCCESS.to_string(),
            message: message.into(),
            data: Some(data),
            warnings: Vec::new(),
        }
    }

    /// Attach warnings from best-effort secondary effects
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
            warnings: Vec::new(),
        }
    }

    /// Whether this response reports success
    pub fn is_success(&self) -> bool {
        self.code == API_CODE_SUCCESS
    }
}
