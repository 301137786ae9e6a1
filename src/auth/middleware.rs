// Authentication middleware for protected routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::debug;

use crate::auth::{
    error::AuthError,
    token::{Role, TokenService},
};

/// Authenticated administrator extractor for write routes
///
/// Validates the bearer token and requires the admin role, the equivalent
/// of a `manage_options` capability check in front of the save endpoint.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: i32,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        // Verify Bearer token format
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidToken)?;

        // Get JWT secret from environment
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| AuthError::ConfigError("JWT_SECRET not configured".to_string()))?;

        // Validate token and check the capability
        let token_service = TokenService::new(jwt_secret);
        let claims = token_service.validate_token(token)?;

        if claims.role != Role::Admin {
            return Err(AuthError::InsufficientPermissions {
                required: Role::Admin,
                actual: claims.role,
            });
        }

        debug!("Authenticated admin user {}", claims.sub);

        Ok(AdminUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
