// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory database, user and router helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `meals`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use axum::Router;
use meals::{
    config::{database::DatabaseUrl, environment::ServerConfig},
    database::Database,
    models::User,
    resources::ServerResources,
    server::build_router,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory).await?)
}

/// Create a test user
pub async fn create_test_user(database: &Database, user_name: &str) -> Result<User> {
    Ok(database.create_user(user_name).await?)
}

/// Create server resources over a fresh in-memory database
pub async fn create_test_server_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    let config = ServerConfig {
        database: DatabaseUrl::Memory,
        ..ServerConfig::default()
    };
    Ok(Arc::new(ServerResources::new(database, config)))
}

/// Full application router with one registered user
pub async fn create_test_app(user_name: &str) -> Result<(Router, Arc<ServerResources>)> {
    let resources = create_test_server_resources().await?;
    create_test_user(&resources.database, user_name).await?;
    Ok((build_router(&resources), resources))
}
