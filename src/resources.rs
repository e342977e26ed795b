// ABOUTME: Shared server resources handed to every route group
// ABOUTME: Bundles the database and configuration behind one Arc for axum state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::database::Database;

/// Resources shared by all handlers, created once at startup
#[derive(Clone)]
pub struct ServerResources {
    /// Recipe, planner and user storage
    pub database: Database,
    /// Resolved server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle resources for the router
    #[must_use]
    pub fn new(database: Database, config: ServerConfig) -> Self {
        Self {
            database,
            config: Arc::new(config),
        }
    }
}
