// ABOUTME: User persistence operations: save, load, list, and delete
// ABOUTME: Resolves stored progression and workout names against the catalog on load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::UserStore;
use crate::constants::tables;
use crate::errors::{AppError, AppResult};
use crate::progression::{Catalog, User};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use std::collections::BTreeSet;
use tracing::{debug, warn};

impl UserStore {
    /// Persist a user and replace all of their stored progress points
    ///
    /// Runs in one transaction, so a reader never sees a partial set of points.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or a database operation fails
    pub async fn save(&self, user: &User) -> AppResult<()> {
        let focus = serde_json::to_string(&user.focus)?;
        let exclude = serde_json::to_string(&user.exclude)?;
        let now = Utc::now().to_rfc3339();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(&format!(
            r"
            INSERT INTO {} (id, name, interval_minutes, focus, exclude, last_progression, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                interval_minutes = excluded.interval_minutes,
                focus = excluded.focus,
                exclude = excluded.exclude,
                last_progression = excluded.last_progression,
                updated_at = excluded.updated_at
            ",
            tables::USERS
        ))
        .bind(&user.id)
        .bind(&user.name)
        .bind(i64::from(user.interval_minutes))
        .bind(&focus)
        .bind(&exclude)
        .bind(user.last_progression.as_deref())
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to save user {}: {e}", user.id)))?;

        sqlx::query(&format!("DELETE FROM {} WHERE user_id = $1", tables::USER_PROGRESS))
            .bind(&user.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to clear progress: {e}")))?;

        for (progression, point) in user.progress() {
            sqlx::query(&format!(
                "INSERT INTO {} (user_id, progression, workout, count) VALUES ($1, $2, $3, $4)",
                tables::USER_PROGRESS
            ))
            .bind(&user.id)
            .bind(progression)
            .bind(&point.workout)
            .bind(point.count)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to save progress point: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit user {}: {e}", user.id)))?;

        debug!(
            user.id = %user.id,
            points = user.progress().len(),
            "Saved user"
        );
        Ok(())
    }

    /// Load a user, resolving stored points against `catalog`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if a stored progression or workout no longer
    /// exists in the catalog, or an error if a database operation fails
    pub async fn load(&self, user_id: &str, catalog: &Catalog) -> AppResult<Option<User>> {
        let row = sqlx::query(&format!(
            r"
            SELECT id, name, interval_minutes, focus, exclude, last_progression
            FROM {}
            WHERE id = $1
            ",
            tables::USERS
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get user {user_id}: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut user = row_to_user(&row)?;

        let points = sqlx::query(&format!(
            r"
            SELECT progression, workout, count
            FROM {}
            WHERE user_id = $1
            ORDER BY progression ASC
            ",
            tables::USER_PROGRESS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get progress for {user_id}: {e}")))?;

        for point in &points {
            let progression_name: String = point.get("progression");
            let workout: String = point.get("workout");
            let count: f64 = point.get("count");
            let resolved = catalog.progression(&progression_name).and_then(|progression| {
                user.register_point(progression, &workout, count).map(|_| ())
            });
            if let Err(e) = resolved {
                warn!(
                    user.id = %user_id,
                    progression = %progression_name,
                    workout = %workout,
                    error = %e,
                    "Stored progress does not match the catalog"
                );
                return Err(AppError::from(e).with_user_id(user_id));
            }
        }

        Ok(Some(user))
    }

    /// Load a user that must exist
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no user has this id, or any error of [`UserStore::load`]
    pub async fn load_required(&self, user_id: &str, catalog: &Catalog) -> AppResult<User> {
        self.load(user_id, catalog)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id}")).with_user_id(user_id))
    }

    /// Ids of every stored user in ascending order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_user_ids(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query(&format!("SELECT id FROM {} ORDER BY id ASC", tables::USERS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list users: {e}")))?;
        Ok(rows.iter().map(|row| row.get("id")).collect())
    }

    /// Delete a user and their progress points; returns whether the user existed
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails
    pub async fn delete(&self, user_id: &str) -> AppResult<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(&format!("DELETE FROM {} WHERE user_id = $1", tables::USER_PROGRESS))
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete progress: {e}")))?;

        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", tables::USERS))
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete user {user_id}: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit delete: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.get("id");
    let interval: i64 = row.get("interval_minutes");
    let focus_json: String = row.get("focus");
    let exclude_json: String = row.get("exclude");

    let interval_minutes = u32::try_from(interval).map_err(|_| {
        AppError::database(format!("User {id} has invalid interval {interval}"))
    })?;
    let focus: BTreeSet<String> = serde_json::from_str(&focus_json)?;
    let exclude: BTreeSet<String> = serde_json::from_str(&exclude_json)?;

    let mut user = User::new(id, row.get::<String, _>("name"), interval_minutes);
    user.set_focus(focus);
    user.set_exclude(exclude);
    user.last_progression = row.get("last_progression");
    Ok(user)
}
