use axum::{extract::State, routing::post, Json, Router};
use serde_json::Value;
use tracing::instrument;

use super::{
    dto::{
        DeactivatePasteRequest, PasteDetailsRequest, PasteDetailsResponse, SubmitPasteRequest,
        SubmittedPaste,
    },
    services,
};
use crate::{
    auth::extractors::MaybeAuthUser,
    error::{success_body, ApiResult},
    extractors::ApiJson,
    state::AppState,
};

pub fn paste_routes() -> Router<AppState> {
    Router::new()
        .route("/paste/submit", post(submit_paste))
        .route("/paste/deactivate", post(deactivate_paste))
        .route("/paste/details", post(paste_details))
}

#[instrument(skip(state, payload))]
pub async fn submit_paste(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
    ApiJson(payload): ApiJson<SubmitPasteRequest>,
) -> ApiResult<Json<SubmittedPaste>> {
    let submitted =
        services::submit_paste(state.pastes.as_ref(), &state.config.paste, session, payload)
            .await?;
    Ok(Json(submitted))
}

#[instrument(skip(state, payload))]
pub async fn deactivate_paste(
    State(state): State<AppState>,
    MaybeAuthUser(session): MaybeAuthUser,
    ApiJson(payload): ApiJson<DeactivatePasteRequest>,
) -> ApiResult<Json<Value>> {
    services::deactivate_paste(state.pastes.as_ref(), session, payload).await?;
    Ok(Json(success_body()))
}

#[instrument(skip(state, payload))]
pub async fn paste_details(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PasteDetailsRequest>,
) -> ApiResult<Json<PasteDetailsResponse>> {
    let details = services::paste_details(state.pastes.as_ref(), payload).await?;
    Ok(Json(PasteDetailsResponse { details }))
}
