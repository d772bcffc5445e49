use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{
    dto::{AuthResponse, CredentialsRequest, PublicUser, RefreshRequest},
    extractors::AuthUser,
    jwt::JwtKeys,
    password::hash_password,
    services::{authenticate, is_valid_username, issue_tokens, MIN_PASSWORD_LEN},
};
use crate::{
    error::{ApiError, ApiResult},
    extractors::ApiJson,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/register", post(register))
        .route("/user/login", post(login))
        .route("/user/refresh", post(refresh))
        .route("/user/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::IncompleteParams);
    };
    let username = username.trim().to_string();

    if !is_valid_username(&username) {
        warn!(%username, "invalid username");
        return Err(ApiError::IncompleteParams);
    }
    if password.len() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::IncompleteParams);
    }

    let hash = hash_password(&password)?;
    let Some(user) = state.users.create(&username, &hash).await? else {
        warn!(%username, "username already registered");
        return Err(ApiError::UsernameNotAvailable);
    };

    info!(user_id = user.user_id, username = %user.username, "user registered");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(ApiError::IncompleteParams);
    };

    let user = authenticate(state.users.as_ref(), username.trim(), &password).await?;

    info!(user_id = user.user_id, username = %user.username, "user logged in");
    let keys = JwtKeys::from_ref(&state);
    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip(state, payload))]
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let token = payload.refresh_token.ok_or(ApiError::IncompleteParams)?;
    let keys = JwtKeys::from_ref(&state);
    let claims = keys.verify_refresh(&token).map_err(|e| {
        warn!(error = %e, "refresh rejected");
        ApiError::AuthFailure
    })?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await?
        .ok_or(ApiError::AuthFailure)?;
    Ok(Json(issue_tokens(&keys, user)?))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<PublicUser>> {
    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::AuthFailure)?;
    Ok(Json(user.into()))
}
