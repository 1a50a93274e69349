//! The command contract layer: the only path by which a todo is read or
//! mutated. Every todo operation requires a resolved session and runs as a
//! single request/response round trip against the store.

use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::{Session, Todo, User};
use crate::schema::{TodoDraft, ValidationError};

#[derive(Clone)]
pub struct AppState {
    pub db_path: PathBuf,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", post(create_session))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/:id", patch(toggle_completed).delete(delete_todo))
        .with_state(state)
}

#[derive(Deserialize)]
struct SessionRequest {
    name: Option<String>,
}

#[derive(Deserialize)]
struct ToggleRequest {
    completed: bool,
}

/// Stand-in for the external identity provider: get-or-create the named
/// user and mint an opaque token for it.
async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<Session>, ApiError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::MissingField("name"))?;

    let db = Database::connect(&state.db_path)?;
    let user = db.get_or_create_user(name)?;
    let session = db.create_session(&user.id)?;
    tracing::debug!(user = %user.name, "issued session");
    Ok(Json(session))
}

async fn list_todos(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let db = Database::connect(&state.db_path)?;
    Ok(Json(db.list_todos(&user.id)?))
}

async fn create_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<Todo>, ApiError> {
    let input = draft.validate()?;
    let db = Database::connect(&state.db_path)?;
    let todo = db.insert_todo(&user.id, &input)?;
    tracing::debug!(todo = %todo.id, user = %user.id, "created todo");
    Ok(Json(todo))
}

async fn toggle_completed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<Todo>, ApiError> {
    let db = Database::connect(&state.db_path)?;
    let todo = load_owned(&db, &id, &user)?;
    if !db.set_completed(&id, req.completed)? {
        return Err(ApiError::NotFound(id));
    }
    Ok(Json(Todo {
        completed: req.completed,
        ..todo
    }))
}

/// Hard delete; responds with the todo's state prior to removal.
async fn delete_todo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let db = Database::connect(&state.db_path)?;
    let todo = load_owned(&db, &id, &user)?;
    if !db.delete_todo(&id)? {
        return Err(ApiError::NotFound(id));
    }
    tracing::debug!(todo = %todo.id, user = %user.id, "deleted todo");
    Ok(Json(todo))
}

/// Ownership gate for single-todo mutations: the id must exist and the
/// caller must own it.
fn load_owned(db: &Database, id: &str, user: &User) -> Result<Todo, ApiError> {
    let todo = db
        .get_todo(id)?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;
    if todo.user_id != user.id {
        return Err(ApiError::Forbidden);
    }
    Ok(todo)
}
