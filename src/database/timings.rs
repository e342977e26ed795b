// ABOUTME: Timing schedule database operations
// ABOUTME: Stores one finish time plus JSON encoded steps per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult, ErrorCode, RecipeError};
use crate::models::{parse_clock_time, Timings, TimingsRequest, UserId};

const CLOCK_FORMAT: &str = "%H:%M:%S";

impl Database {
    /// Create the timings table
    pub(super) async fn migrate_timings(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS timings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER UNIQUE NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                finish_time TEXT NOT NULL,
                steps TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Store the first timing schedule of a user
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::TimingAlreadyExists`] if the user already has
    /// one, or a database error
    pub async fn create_timings(&self, user_id: UserId, request: &TimingsRequest) -> AppResult<Timings> {
        let steps = serde_json::to_string(&request.steps)?;
        let mut tx = self.begin_write().await?;
        let result = sqlx::query("INSERT INTO timings (user_id, finish_time, steps) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(request.finish_time.format(CLOCK_FORMAT).to_string())
            .bind(&steps)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)
            .map_err(|e| {
                if e.code == ErrorCode::ResourceAlreadyExists {
                    RecipeError::TimingAlreadyExists.into()
                } else {
                    e
                }
            })?;
        tx.commit().await?;

        info!(user.id = user_id, steps = request.steps.len(), "Timings created");
        Ok(Timings {
            id: Some(result.last_insert_rowid()),
            finish_time: request.finish_time,
            steps: request.steps.clone(),
        })
    }

    /// Get the stored timing schedule of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn get_timings(&self, user_id: UserId) -> AppResult<Option<Timings>> {
        let row = sqlx::query("SELECT id, finish_time, steps FROM timings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get timings: {e}")))?;

        row.map(|r| row_to_timings(&r)).transpose()
    }

    /// Insert or replace the timing schedule of a user
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails
    pub async fn upsert_timings(&self, user_id: UserId, request: &TimingsRequest) -> AppResult<Timings> {
        let steps = serde_json::to_string(&request.steps)?;
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO timings (user_id, finish_time, steps) VALUES ($1, $2, $3)
            ON CONFLICT(user_id) DO UPDATE SET
                finish_time = excluded.finish_time,
                steps = excluded.steps,
                updated_at = CURRENT_TIMESTAMP
            RETURNING id
            ",
        )
        .bind(user_id)
        .bind(request.finish_time.format(CLOCK_FORMAT).to_string())
        .bind(&steps)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save timings: {e}")))?;

        info!(user.id = user_id, steps = request.steps.len(), "Timings saved");
        Ok(Timings {
            id: Some(id),
            finish_time: request.finish_time,
            steps: request.steps.clone(),
        })
    }
}

fn row_to_timings(row: &SqliteRow) -> AppResult<Timings> {
    let finish_time: String = row.try_get("finish_time")?;
    let steps: String = row.try_get("steps")?;
    Ok(Timings {
        id: Some(row.try_get("id")?),
        finish_time: parse_clock_time(&finish_time).ok_or_else(|| {
            AppError::database(format!("Stored finish time '{finish_time}' is not a clock time"))
        })?,
        steps: serde_json::from_str(&steps)?,
    })
}
