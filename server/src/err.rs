//! Maps `tpe_db`/`tpe_core` errors onto the API's HTTP status conventions.
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;
use tpe_core::error::ErrorKind;

#[derive(Error, Debug)]
pub(crate) enum AppError {
    #[error("{0}")]
    Db(#[from] tpe_db::DbError),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let (status, error_message) = match &self {
            AppError::Db(e) => (status_for_kind(e.kind()), e.to_string()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(error = %error_message, "request failed");
        }

        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}

/// Status conventions, keyed off the error-kind classification both
/// `tpe_core` and `tpe_db` funnel their failures through.
fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
        ErrorKind::InvariantConflict => StatusCode::CONFLICT,
        ErrorKind::DrawFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<tpe_core::error::CoreError> for AppError {
    fn from(e: tpe_core::error::CoreError) -> Self {
        AppError::Db(tpe_db::DbError::Core(e))
    }
}

pub(crate) type AppResult<T> = Result<T, AppError>;
