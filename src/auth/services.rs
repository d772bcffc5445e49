use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use super::{
    dto::AuthResponse,
    jwt::JwtKeys,
    password::verify_password,
    repo::UserRepo,
    repo_types::User,
};
use crate::error::{ApiError, ApiResult};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_username(username: &str) -> bool {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").unwrap();
    }
    USERNAME_RE.is_match(username)
}

/// Look up `username` and check `password` against its hash.
pub async fn authenticate(
    users: &dyn UserRepo,
    username: &str,
    password: &str,
) -> ApiResult<User> {
    let Some(user) = users.find_by_username(username).await? else {
        warn!(%username, "login unknown username");
        return Err(ApiError::AuthFailure);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(%username, user_id = user.user_id, "login invalid password");
        return Err(ApiError::AuthFailure);
    }
    Ok(user)
}

/// Sign a fresh access/refresh pair for `user`.
pub fn issue_tokens(keys: &JwtKeys, user: User) -> ApiResult<AuthResponse> {
    Ok(AuthResponse {
        access_token: keys.sign_access(user.user_id)?,
        refresh_token: keys.sign_refresh(user.user_id)?,
        user: user.into(),
    })
}
