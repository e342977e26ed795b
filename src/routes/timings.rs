// ABOUTME: Route handlers for the timing schedule API
// ABOUTME: One schedule per user with create, read and upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::auth::authenticate;
use crate::constants::api::API_V1_PREFIX;
use crate::errors::AppError;
use crate::models::TimingsRequest;
use crate::resources::ServerResources;

/// Timing routes handler
pub struct TimingRoutes;

impl TimingRoutes {
    /// Create all timing routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                &format!("{API_V1_PREFIX}/timings"),
                post(Self::handle_create)
                    .get(Self::handle_get)
                    .patch(Self::handle_update),
            )
            .with_state(resources)
    }

    /// Handle POST /api/v1/timings - Store the first schedule
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<TimingsRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        body.validate()?;
        let timings = resources.database.create_timings(user.id, &body).await?;
        Ok((StatusCode::CREATED, Json(timings)).into_response())
    }

    /// Handle GET /api/v1/timings - The stored schedule
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let timings = resources
            .database
            .get_timings(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Timings"))?;
        Ok((StatusCode::OK, Json(timings)).into_response())
    }

    /// Handle PATCH /api/v1/timings - Insert or replace the schedule
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<TimingsRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        body.validate()?;
        let timings = resources.database.upsert_timings(user.id, &body).await?;
        Ok((StatusCode::OK, Json(timings)).into_response())
    }
}
