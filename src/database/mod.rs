// ABOUTME: SQLite database manager for users, recipes, ingredients, timings and plans
// ABOUTME: Owns the connection pool and runs idempotent schema migrations on startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Database Management
//!
//! All storage goes through [`Database`]. Operations are split by table group:
//! users, recipes (with shared ingredients), timings and planned days. Writes
//! that touch several rows run inside a single transaction.

mod plans;
mod recipes;
mod timings;
mod users;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::config::database::DatabaseUrl;
use crate::errors::{AppError, AppResult};

/// Database manager for all persistent state
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations
    ///
    /// File databases (and their parent directory) are created when missing.
    /// An in-memory database uses a single long-lived connection so every
    /// caller sees the same data.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        if let Some(parent) = url.file_path().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::config(format!(
                        "Failed to create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let database = Self { pool };
        database.migrate().await?;
        info!(database = %url, "Database ready");
        Ok(database)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a write transaction that takes the SQLite writer lock up front
    ///
    /// A deferred `BEGIN` that reads before it writes cannot upgrade its lock
    /// while another writer commits and fails with `SQLITE_BUSY` at once.
    /// `BEGIN IMMEDIATE` queues on the busy timeout instead, so racing writers
    /// see each other's committed rows.
    pub(crate) async fn begin_write(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_recipes().await?;
        self.migrate_timings().await?;
        self.migrate_plans().await?;
        Ok(())
    }
}
