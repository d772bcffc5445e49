use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::ApiError;

/// Requires a valid access token, yielding the user ID.
#[derive(Debug)]
pub struct AuthUser(pub i64);

/// Session identity when one is present. Missing, malformed, expired and
/// refresh-kind tokens all yield `None`.
#[derive(Debug)]
pub struct MaybeAuthUser(pub Option<i64>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

fn session_user(parts: &Parts, keys: &JwtKeys) -> Option<i64> {
    let token = bearer_token(parts)?;
    match keys.verify_access(token) {
        Ok(claims) => Some(claims.sub),
        Err(e) => {
            warn!(error = %e, "ignoring invalid session token");
            None
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        session_user(parts, &keys)
            .map(AuthUser)
            .ok_or(ApiError::AuthFailure)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        Ok(MaybeAuthUser(session_user(parts, &keys)))
    }
}
