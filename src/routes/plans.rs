// ABOUTME: Route handlers for the meal planner API
// ABOUTME: Plans one recipe per day, lists a date range and summarises history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::auth::authenticate;
use crate::constants::api::API_V1_PREFIX;
use crate::errors::AppError;
use crate::models::{PlanRangeQuery, PlannedDayRequest};
use crate::resources::ServerResources;

/// Planner routes handler
pub struct PlanRoutes;

impl PlanRoutes {
    /// Create all planner routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                &format!("{API_V1_PREFIX}/planned_day"),
                post(Self::handle_plan).get(Self::handle_range),
            )
            .route(
                &format!("{API_V1_PREFIX}/planned_day/summary"),
                get(Self::handle_summary),
            )
            .with_state(resources)
    }

    /// Handle POST /api/v1/planned_day - Plan a recipe for a day
    async fn handle_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<PlannedDayRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let planned = resources
            .database
            .plan_day(user.id, body.day, body.recipe_id)
            .await?;
        Ok((StatusCode::CREATED, Json(planned)).into_response())
    }

    /// Handle GET /api/v1/planned_day - Days between two dates, inclusive
    async fn handle_range(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<PlanRangeQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        if query.end_date < query.start_date {
            return Err(AppError::invalid_input(
                "end_date must not be before start_date",
            ));
        }
        let days = resources
            .database
            .get_planned_days(user.id, query.start_date, query.end_date)
            .await?;
        Ok((StatusCode::OK, Json(days)).into_response())
    }

    /// Handle GET /api/v1/planned_day/summary - Plan counts per recipe
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let summary = resources.database.summarise_plans(user.id).await?;
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
