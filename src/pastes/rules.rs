//! Authorization decisions for paste submission, deactivation and viewing.
//!
//! Everything here is a pure function of the paste, the session identity and
//! the credentials supplied with the request. Password verification is
//! passed in so the decision stays independent of the hashing scheme.

use tracing::warn;

use super::repo_types::Paste;
use crate::error::ApiError;

/// Why access was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The session user owns the paste.
    Owner,
    /// The request carried the paste's deactivation token.
    Token,
    /// The paste has no password.
    Public,
    /// The request carried the paste's password.
    Password,
}

/// Why access was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// A `user_id` was given that is not the session user.
    UserMismatch,
    /// No usable credential was supplied.
    MissingCredential,
    /// A credential was supplied and did not match.
    WrongCredential,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Grant),
    Deny(Denial),
}

impl Decision {
    pub fn into_result(self) -> Result<Grant, ApiError> {
        match self {
            Decision::Allow(grant) => Ok(grant),
            Decision::Deny(denial) => {
                warn!(?denial, "paste access denied");
                Err(ApiError::AuthFailure)
            }
        }
    }
}

/// Owner to record for a new paste.
///
/// An explicit `user_id` must be the session user. Without one the paste
/// goes to the session user, or to nobody when there is no session.
pub fn submission_owner(
    requested: Option<i64>,
    session: Option<i64>,
) -> Result<Option<i64>, Denial> {
    match (requested, session) {
        (Some(requested), Some(session)) if requested == session => Ok(Some(session)),
        (Some(_), _) => Err(Denial::UserMismatch),
        (None, session) => Ok(session),
    }
}

pub fn authorize_deactivation(
    paste: &Paste,
    session: Option<i64>,
    token: Option<&str>,
) -> Decision {
    if paste.user_id.is_some() && paste.user_id == session {
        return Decision::Allow(Grant::Owner);
    }
    match token {
        Some(token) if tokens_match(token, &paste.deactivation_token) => {
            Decision::Allow(Grant::Token)
        }
        Some(_) => Decision::Deny(Denial::WrongCredential),
        // A session that does not own the paste is a wrong credential.
        None if session.is_some() => Decision::Deny(Denial::WrongCredential),
        None => Decision::Deny(Denial::MissingCredential),
    }
}

pub fn authorize_view<F>(
    paste: &Paste,
    password: Option<&str>,
    verify: F,
) -> anyhow::Result<Decision>
where
    F: FnOnce(&str, &str) -> anyhow::Result<bool>,
{
    let Some(hash) = paste.password_hash.as_deref() else {
        return Ok(Decision::Allow(Grant::Public));
    };
    let Some(password) = password else {
        return Ok(Decision::Deny(Denial::MissingCredential));
    };
    if verify(password, hash)? {
        Ok(Decision::Allow(Grant::Password))
    } else {
        Ok(Decision::Deny(Denial::WrongCredential))
    }
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(supplied: &str, stored: &str) -> bool {
    let (a, b) = (supplied.as_bytes(), stored.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
