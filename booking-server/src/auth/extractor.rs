//! JWT Extractors
//!
//! Axum extractors turning the Authorization header into an authenticated
//! manager identity. Handlers for owner-scoped mutations take
//! [`AuthManager`]; handlers where identity merely changes behavior (e.g.
//! owner-created reservations auto-confirm) take [`MaybeManager`].

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::utils::AppError;

/// The authenticated manager performing a request
#[derive(Debug, Clone)]
pub struct AuthManager {
    /// Manager record id ("manager:...")
    pub id: String,
    /// Display name from the token
    pub name: String,
}

impl FromRequestParts<ServerState> for AuthManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted earlier in the request
        if let Some(manager) = parts.extensions.get::<AuthManager>() {
            return Ok(manager.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
                AppError::InvalidToken("Invalid authorization header".to_string())
            })?,
            None => {
                tracing::warn!(target: "security", uri = %parts.uri, "missing credentials");
                return Err(AppError::Unauthorized);
            }
        };

        match state.jwt_service.validate_token(token) {
            Ok(claims) => {
                let manager = AuthManager {
                    id: claims.sub,
                    name: claims.name,
                };
                parts.extensions.insert(manager.clone());
                Ok(manager)
            }
            Err(e) => {
                tracing::warn!(target: "security", error = %e, uri = %parts.uri, "auth failed");
                Err(AppError::InvalidToken(e.to_string()))
            }
        }
    }
}

/// Optional manager identity: anonymous requests pass through as `None`,
/// but a *present* invalid token is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeManager(pub Option<AuthManager>);

impl FromRequestParts<ServerState> for MaybeManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get(http::header::AUTHORIZATION).is_none() {
            return Ok(MaybeManager(None));
        }
        AuthManager::from_request_parts(parts, state)
            .await
            .map(|m| MaybeManager(Some(m)))
    }
}
