//! todotracker: a multi-user todo list behind a JSON HTTP API.
//!
//! Callers exchange a user name for a session token, then create, list,
//! toggle, and delete their own todos. Every operation is a single CRUD
//! round trip against SQLite, gated by a session check.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
