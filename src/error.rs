use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Every failure an endpoint can report. Each variant maps to one fixed
/// status code and body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("the request is missing one or more required parameters")]
    IncompleteParams,

    #[error("authentication or authorization failed")]
    AuthFailure,

    #[error("the requested paste does not exist")]
    NonexistentPaste,

    #[error("the requested username is already taken")]
    UsernameNotAvailable,

    #[error("undefined failure: {0}")]
    Undefined(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IncompleteParams => StatusCode::BAD_REQUEST,
            ApiError::AuthFailure => StatusCode::UNAUTHORIZED,
            ApiError::NonexistentPaste => StatusCode::NOT_FOUND,
            ApiError::UsernameNotAvailable => StatusCode::CONFLICT,
            ApiError::Undefined(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            ApiError::IncompleteParams => "incomplete_params_failure",
            ApiError::AuthFailure => "auth_failure",
            ApiError::NonexistentPaste => "nonexistent_paste_failure",
            ApiError::UsernameNotAvailable => "username_not_available_failure",
            ApiError::Undefined(_) => "undefined_failure",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::IncompleteParams => {
                "The request is missing one or more required parameters."
            }
            ApiError::AuthFailure => "The user could not be authenticated.",
            ApiError::NonexistentPaste => "The requested paste does not exist.",
            ApiError::UsernameNotAvailable => "The requested username is not available.",
            ApiError::Undefined(_) => "The server encountered an undefined failure.",
        }
    }

    /// The fixed JSON body sent to the client. Never includes the inner
    /// error of `Undefined`.
    pub fn body(&self) -> Value {
        json!({
            "success": false,
            "failure": self.failure(),
            "message": self.message(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Undefined(ref e) = self {
            error!(error = ?e, "undefined failure");
        }
        (self.status(), Json(self.body())).into_response()
    }
}

/// Body returned by endpoints that only report success.
pub fn success_body() -> Value {
    json!({
        "success": true,
        "failure": null,
        "message": null,
    })
}
