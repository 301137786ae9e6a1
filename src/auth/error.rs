// Authentication and authorization error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::auth::token::Role;

/// Authentication and authorization error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    /// Caller lacks the capability required for the operation
    #[error("Insufficient permissions: required role '{required}', but user has role '{actual}'")]
    InsufficientPermissions { required: Role, actual: Role },

    /// Configuration error in the authorization system
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::MissingToken => {
                warn!("Request without authentication token");
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AuthError::InvalidToken | AuthError::ExpiredToken => {
                warn!("Rejected token: {}", self);
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AuthError::InsufficientPermissions { .. } => {
                warn!("Forbidden access attempt: {}", self);
                (StatusCode::FORBIDDEN, self.to_string())
            }
            AuthError::TokenGenerationError(msg) | AuthError::ConfigError(msg) => {
                error!("Auth configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
