// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Answers without authentication or database access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes() -> Router {
        Router::new().route("/health", get(Self::handle_health))
    }

    async fn handle_health() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "message": "Server is running."
        }))
    }
}
