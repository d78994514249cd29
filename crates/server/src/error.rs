use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ratings::{ResolveError, ResolveErrorKind};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by HTTP handlers, rendered as `{ "error": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Upstream error: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<imdb::ImdbError> for AppError {
    fn from(e: imdb::ImdbError) -> Self {
        match e.status_code().and_then(|s| StatusCode::from_u16(s).ok()) {
            Some(status) => AppError::Upstream {
                status,
                message: e.to_string(),
            },
            None => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Resolve(e) => {
                let kind = e.kind();
                let status = match kind {
                    ResolveErrorKind::IdentifierNotFound => StatusCode::NOT_FOUND,
                    ResolveErrorKind::RatingFetchFailure => StatusCode::BAD_GATEWAY,
                };
                tracing::error!("Rating resolution failed: {}", e);
                (
                    status,
                    Json(json!({ "error": e.to_string(), "kind": kind })),
                )
                    .into_response()
            }
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream request failed: {}", message);
                (status, Json(json!({ "error": message }))).into_response()
            }
            AppError::Internal(message) => {
                tracing::error!("{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
