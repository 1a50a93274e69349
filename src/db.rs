use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::{Session, Todo, User};
use crate::schema::TodoInput;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn connect<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("opening database at {}", path.as_ref().display()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_todos_user ON todos(user_id);
            "#,
        )?;
        Ok(())
    }

    pub fn get_or_create_user(&self, name: &str) -> anyhow::Result<User> {
        let existing = self
            .conn
            .query_row(
                "SELECT id, name FROM users WHERE name = ?1",
                params![name],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        if let Some(user) = existing {
            return Ok(user);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };
        self.conn.execute(
            "INSERT INTO users (id, name) VALUES (?1, ?2)",
            params![user.id, user.name],
        )?;
        Ok(user)
    }

    pub fn create_session(&self, user_id: &str) -> anyhow::Result<Session> {
        let session = Session {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
        };
        self.conn.execute(
            "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![session.token, session.user_id, Utc::now().to_rfc3339()],
        )?;
        Ok(session)
    }

    pub fn resolve_session(&self, token: &str) -> anyhow::Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT u.id, u.name FROM sessions s \
                 JOIN users u ON u.id = s.user_id WHERE s.token = ?1",
                params![token],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn insert_todo(&self, user_id: &str, input: &TodoInput) -> anyhow::Result<Todo> {
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: input.title.clone(),
            content: input.content.clone(),
            completed: false,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO todos (id, user_id, title, content, completed, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                todo.id,
                todo.user_id,
                todo.title,
                todo.content,
                todo.completed,
                todo.created_at.to_rfc3339()
            ],
        )?;
        Ok(todo)
    }

    pub fn list_todos(&self, user_id: &str) -> anyhow::Result<Vec<Todo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, title, content, completed, created_at FROM todos \
             WHERE user_id = ?1 ORDER BY created_at ASC, id ASC",
        )?;
        let rows = stmt.query_map(params![user_id], todo_from_row)?;

        let mut todos = Vec::new();
        for todo in rows {
            todos.push(todo?);
        }
        Ok(todos)
    }

    pub fn get_todo(&self, id: &str) -> anyhow::Result<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                "SELECT id, user_id, title, content, completed, created_at FROM todos \
                 WHERE id = ?1",
                params![id],
                todo_from_row,
            )
            .optional()?;
        Ok(todo)
    }

    /// Returns false when the row no longer exists.
    pub fn set_completed(&self, id: &str, completed: bool) -> anyhow::Result<bool> {
        let updated = self.conn.execute(
            "UPDATE todos SET completed = ?1 WHERE id = ?2",
            params![completed, id],
        )?;
        Ok(updated > 0)
    }

    /// Returns false when the row no longer exists.
    pub fn delete_todo(&self, id: &str) -> anyhow::Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    let created_at: String = row.get(5)?;
    Ok(Todo {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        completed: row.get(4)?,
        created_at: parse_datetime(&created_at),
    })
}

fn parse_datetime(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
