// ABOUTME: Route handlers for user registration and the current user
// ABOUTME: Registration is open; the current user endpoint checks basic auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::auth::authenticate;
use crate::constants::api::API_V1_PREFIX;
use crate::errors::AppError;
use crate::models::CreateUserRequest;
use crate::resources::ServerResources;

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(&format!("{API_V1_PREFIX}/users"), post(Self::handle_create))
            .route(&format!("{API_V1_PREFIX}/users/me"), get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/v1/users - Register a user
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.database.create_user(&body.user_name).await?;
        Ok((StatusCode::CREATED, Json(user)).into_response())
    }

    /// Handle GET /api/v1/users/me - The authenticated user
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        Ok((StatusCode::OK, Json(user)).into_response())
    }
}
