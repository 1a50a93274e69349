//! Session resolution: one bearer token in, one user identity out.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::api::AppState;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::User;

/// The caller's resolved identity for the duration of one request.
///
/// Extracting this is the authorization gate: handlers that take a
/// `CurrentUser` never run without a valid session.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        let db = Database::connect(&state.db_path)?;
        let user = db.resolve_session(token)?.ok_or(ApiError::Unauthorized)?;
        Ok(CurrentUser(user))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
