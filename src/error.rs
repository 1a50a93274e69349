use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::ValidationError;

/// Every way a command can fail, mapped onto one HTTP response shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no valid session")]
    Unauthorized,
    #[error("todo belongs to another user")]
    Forbidden,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("todo {0} not found")]
    NotFound(String),
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Persistence(err) => {
                tracing::error!(error = %format!("{err:#}"), "persistence failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        };

        // Persistence details stay in the log, not on the wire.
        let message = match &self {
            ApiError::Persistence(_) => "internal error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { code, message })).into_response()
    }
}
