// ABOUTME: SQLite persistence for coached users and their progress points
// ABOUTME: Owns the connection pool and the schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Users are stored as one row in `users` plus one row per progression in
//! `user_progress`. Progressions and workouts are stored by name and resolved
//! against the loaded catalog when a user is read back.

mod users;

use crate::constants::tables;
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::debug;

/// User store backed by a `SQLite` pool
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Wrap an existing pool; call [`UserStore::migrate`] before use
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and run migrations
    ///
    /// File databases are created when missing. In-memory databases are
    /// limited to a single connection so every query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let connection_options = if database_url.starts_with("sqlite:")
            && !in_memory
            && !database_url.contains('?')
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let mut options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 5 });
        if in_memory {
            // Closing the only connection would drop the database
            options = options.idle_timeout(None).max_lifetime(None);
        }
        let pool = options
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {database_url}: {e}")))?;

        let store = Self::new(pool);
        store.migrate().await?;
        debug!(database.url = %database_url, "User store ready");
        Ok(store)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                interval_minutes INTEGER NOT NULL,
                focus TEXT NOT NULL DEFAULT '[]',
                exclude TEXT NOT NULL DEFAULT '[]',
                last_progression TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            tables::USERS
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {} (
                user_id TEXT NOT NULL REFERENCES {}(id) ON DELETE CASCADE,
                progression TEXT NOT NULL,
                workout TEXT NOT NULL,
                count REAL NOT NULL,
                PRIMARY KEY (user_id, progression)
            )
            ",
            tables::USER_PROGRESS,
            tables::USERS
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_progress table: {e}")))?;

        Ok(())
    }
}
