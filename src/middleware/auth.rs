//! Bearer-token identity
//!
//! Tokens are issued elsewhere; this service only verifies them. Requests
//! without a valid token proceed anonymously, and handlers decide whether
//! they need a user via [`AuthenticatedUser`] or [`OptionalAuth`].

use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// JWT claims accepted by this service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    #[serde(default)]
    pub username: String,
    pub exp: i64,
}

/// Verify an HS256 token and extract its claims
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Resolve the caller from an `Authorization` header value
fn identify(header: &str, secret: &str) -> AppResult<AuthenticatedUser> {
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;
    let claims = verify_token(token, secret)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

    Ok(AuthenticatedUser {
        id,
        username: claims.username,
    })
}

/// Authenticated user extracted from JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Optional authenticated user wrapper (never fails)
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuth(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

/// Attach the caller's identity when a valid bearer token is present
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(header) = header {
        match identify(header, &state.config().jwt.secret) {
            Ok(user) => {
                debug!(user_id = %user.id, "Request authenticated");
                request.extensions_mut().insert(user);
            }
            Err(e) => {
                debug!(path = %request.uri().path(), error = %e, "Ignoring unusable bearer token");
            }
        }
    }

    next.run(request).await
}
