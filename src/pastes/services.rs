use rand::{distributions::Alphanumeric, Rng};
use time::OffsetDateTime;
use tracing::{info, warn};

use super::{
    dto::{
        DeactivatePasteRequest, PasteDetailsRequest, PasteView, SubmitPasteRequest,
        SubmittedPaste,
    },
    repo::PasteRepo,
    repo_types::{NewPaste, Paste},
    rules::{authorize_deactivation, authorize_view, submission_owner, Grant},
};
use crate::{
    auth::password::{hash_password, verify_password},
    config::PasteConfig,
    error::{ApiError, ApiResult},
};

pub const DEACTIVATION_TOKEN_LEN: usize = 40;

pub fn generate_deactivation_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEACTIVATION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_expiry(ts: Option<i64>, now: OffsetDateTime) -> ApiResult<Option<OffsetDateTime>> {
    let Some(ts) = ts else {
        return Ok(None);
    };
    let expiry = OffsetDateTime::from_unix_timestamp(ts).map_err(|_| ApiError::IncompleteParams)?;
    if expiry <= now {
        warn!(expiry_time = ts, "expiry time is not in the future");
        return Err(ApiError::IncompleteParams);
    }
    Ok(Some(expiry))
}

/// Load a paste that is still visible: present, active and unexpired.
async fn find_live(pastes: &dyn PasteRepo, paste_id: i64) -> ApiResult<Paste> {
    let now = OffsetDateTime::now_utc();
    pastes
        .get_by_id(paste_id)
        .await?
        .filter(|p| p.is_live(now))
        .ok_or(ApiError::NonexistentPaste)
}

pub async fn submit_paste(
    pastes: &dyn PasteRepo,
    config: &PasteConfig,
    session: Option<i64>,
    req: SubmitPasteRequest,
) -> ApiResult<SubmittedPaste> {
    let contents = non_empty(req.contents).ok_or(ApiError::IncompleteParams)?;
    if contents.len() > config.max_contents_bytes {
        warn!(len = contents.len(), max = config.max_contents_bytes, "paste too large");
        return Err(ApiError::IncompleteParams);
    }

    let user_id = submission_owner(req.user_id, session).map_err(|denial| {
        warn!(?denial, requested = ?req.user_id, ?session, "paste submission denied");
        ApiError::AuthFailure
    })?;

    let expiry_time = parse_expiry(req.expiry_time, OffsetDateTime::now_utc())?;
    let password_hash = non_empty(req.password)
        .map(|p| hash_password(&p))
        .transpose()?;

    let paste = pastes
        .create(NewPaste {
            user_id,
            contents,
            title: non_empty(req.title),
            language: non_empty(req.language),
            password_hash,
            deactivation_token: generate_deactivation_token(),
            expiry_time,
        })
        .await?;

    info!(paste_id = paste.paste_id, user_id = ?paste.user_id, "paste submitted");
    Ok(SubmittedPaste {
        paste: PasteView::from(&paste),
        deactivation_token: paste.deactivation_token,
    })
}

pub async fn deactivate_paste(
    pastes: &dyn PasteRepo,
    session: Option<i64>,
    req: DeactivatePasteRequest,
) -> ApiResult<Grant> {
    let paste_id = req.paste_id.ok_or(ApiError::IncompleteParams)?;
    let paste = find_live(pastes, paste_id).await?;

    let grant =
        authorize_deactivation(&paste, session, req.deactivation_token.as_deref()).into_result()?;
    // A concurrent request may have deactivated it since `find_live`.
    if !pastes.deactivate(paste_id).await? {
        warn!(paste_id, "paste already deactivated");
        return Err(ApiError::NonexistentPaste);
    }

    info!(paste_id, ?grant, "paste deactivated");
    Ok(grant)
}

pub async fn paste_details(
    pastes: &dyn PasteRepo,
    req: PasteDetailsRequest,
) -> ApiResult<PasteView> {
    let paste_id = req.paste_id.ok_or(ApiError::IncompleteParams)?;
    let paste = find_live(pastes, paste_id).await?;

    authorize_view(&paste, req.password.as_deref(), verify_password)?.into_result()?;
    Ok(PasteView::from(&paste))
}
