use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::Paste;

// Request fields are optional so a missing one surfaces as incomplete params.

#[derive(Debug, Deserialize)]
pub struct SubmitPasteRequest {
    pub contents: Option<String>,
    pub user_id: Option<i64>,
    pub password: Option<String>,
    pub title: Option<String>,
    pub language: Option<String>,
    /// Unix timestamp, seconds.
    pub expiry_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeactivatePasteRequest {
    pub paste_id: Option<i64>,
    pub deactivation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasteDetailsRequest {
    pub paste_id: Option<i64>,
    pub password: Option<String>,
}

/// Public representation of a paste. Secrets are never included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasteView {
    pub paste_id: i64,
    pub user_id: Option<i64>,
    pub contents: String,
    pub title: Option<String>,
    pub language: Option<String>,
    pub is_active: bool,
    pub is_password_protected: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub post_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expiry_time: Option<OffsetDateTime>,
}

impl From<&Paste> for PasteView {
    fn from(p: &Paste) -> Self {
        Self {
            paste_id: p.paste_id,
            user_id: p.user_id,
            contents: p.contents.clone(),
            title: p.title.clone(),
            language: p.language.clone(),
            is_active: p.is_active,
            is_password_protected: p.password_hash.is_some(),
            post_time: p.post_time,
            expiry_time: p.expiry_time,
        }
    }
}

/// Returned once, on submission: the only time the token is revealed.
#[derive(Debug, Serialize)]
pub struct SubmittedPaste {
    #[serde(flatten)]
    pub paste: PasteView,
    pub deactivation_token: String,
}

#[derive(Debug, Serialize)]
pub struct PasteDetailsResponse {
    pub details: PasteView,
}
