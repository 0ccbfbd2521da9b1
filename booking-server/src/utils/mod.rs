//! Utility module
//!
//! - [`AppError`] - application error type and HTTP mapping
//! - [`AppResult`] - handler result alias
//! - logging setup

pub mod error;
pub mod logger;
pub mod time;

pub use error::AppError;

/// Result alias used by handlers and services.
pub type AppResult<T> = Result<T, AppError>;

/// Create a successful response envelope.
pub fn ok<T: serde::Serialize>(data: T) -> axum::Json<shared::ApiResponse<T>> {
    axum::Json(shared::ApiResponse::ok(data))
}

/// Create a successful response envelope carrying secondary-effect warnings.
pub fn ok_with_warnings<T: serde::Serialize>(
    data: T,
    warnings: Vec<String>,
) -> axum::Json<shared::ApiResponse<T>> {
    axum::Json(shared::ApiResponse::ok(data).with_warnings(warnings))
}
