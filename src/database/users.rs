// ABOUTME: User database operations
// ABOUTME: Handles user registration and lookup by name for basic auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult, ErrorCode, RecipeError};
use crate::models::{User, UserId};

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_name TEXT UNIQUE NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the name is taken, `INVALID_INPUT`
    /// for a blank name, or a database error
    pub async fn create_user(&self, user_name: &str) -> AppResult<User> {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return Err(AppError::invalid_input("User name must not be empty"));
        }

        let result = sqlx::query("INSERT INTO users (user_name) VALUES ($1)")
            .bind(user_name)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)
            .map_err(|e| {
                if e.code == ErrorCode::ResourceAlreadyExists {
                    RecipeError::user_already_exists(user_name).into()
                } else {
                    e
                }
            })?;

        let user = User {
            id: result.last_insert_rowid(),
            user_name: user_name.to_owned(),
        };
        info!(user.id = user.id, user.name = %user.user_name, "User created");
        Ok(user)
    }

    /// Find a user by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_name(&self, user_name: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, user_name FROM users WHERE user_name = $1")
            .bind(user_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by name: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Find a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, user_name FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        user_name: row.try_get("user_name")?,
    })
}
