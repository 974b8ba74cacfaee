//! JWT Authentication Middleware
//!
//! Extracts the bearer token from the Authorization header, validates it,
//! and makes the decoded identity available to handlers via request
//! extensions. Any failure short-circuits with a generic 401; the wrapped
//! handler is never invoked.

use axum::{extract::Request, http::header, middleware::Next, response::Response};
use skycast_auth::JwtValidator;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;

/// Authenticated user context extracted from the session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User UUID
    pub user_id: Uuid,
    /// Username at token issuance time
    pub username: String,
}

/// JWT validation state shared across middleware instances
#[derive(Clone)]
pub struct JwtState {
    pub validator: Arc<JwtValidator>,
}

impl JwtState {
    /// Create new JWT state with the given secret
    pub fn new(secret: &[u8]) -> Self {
        Self {
            validator: Arc::new(JwtValidator::new(secret)),
        }
    }
}

/// Authentication middleware that validates bearer session tokens.
///
/// Requires `Authorization: Bearer <token>` (single space, `Bearer` is the
/// one accepted scheme). Bad signature, malformed token and expiry all map
/// to the same generic 401 so clients cannot tell which check failed.
pub async fn require_auth(
    state: axum::extract::State<Arc<JwtState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("malformed authorization header".to_string()))?;

    let claims = state
        .validator
        .validate(token)
        .map_err(|_| ApiError::Unauthorized("invalid or expired token".to_string()))?;

    let auth_user = AuthUser {
        user_id: claims.sub,
        username: claims.username,
    };

    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
