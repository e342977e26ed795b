// ABOUTME: HTML handlers for the weekly meal planner page
// ABOUTME: Shows the coming week, suggests meal names and records planned days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::{HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{Days, Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use super::components;
use crate::auth::authenticate;
use crate::constants::planner::DAYS_IN_PLAN;
use crate::errors::{AppError, AppResult, RecipeError};
use crate::models::UserId;
use crate::resources::ServerResources;

/// HTMX event fired after a day was planned
const SHOW_SUCCESS: &str = "show-success";
/// HTMX event fired when planning failed
const SHOW_ERROR: &str = "show-error";

/// Query of `GET /meals`
#[derive(Debug, Default, Deserialize)]
pub struct MealQuery {
    /// Partial meal name typed so far
    #[serde(default)]
    pub meal: String,
}

/// Planner row submission
#[derive(Debug, Deserialize)]
pub struct PlannedDayForm {
    /// Recipe name typed into the row
    pub meal: String,
    /// ISO date of the row
    pub day: NaiveDate,
}

/// Planner page routes handler
pub struct PlannerPages;

impl PlannerPages {
    /// Create all planner page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/plan.html", get(Self::handle_page))
            .route("/weeks_plan", get(Self::handle_week))
            .route("/meals", get(Self::handle_meals))
            .route("/planned_day", post(Self::handle_plan_day))
            .route("/summary", get(Self::handle_summary))
            .with_state(resources)
    }

    /// Handle GET /plan.html - Planner page
    async fn handle_page(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources.database).await?;
        Ok(Html(components::page(&components::planner_content())).into_response())
    }

    /// Handle GET /weeks_plan - The next seven days starting today
    async fn handle_week(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let today = Local::now().date_naive();
        let week = Self::week_plan(&resources, user.id, today).await?;
        Ok(Html(components::planned_week(&week)).into_response())
    }

    /// Days from `start` with the name of the planned meal, if any
    async fn week_plan(
        resources: &ServerResources,
        user_id: UserId,
        start: NaiveDate,
    ) -> AppResult<Vec<(NaiveDate, Option<String>)>> {
        let end = start
            .checked_add_days(Days::new(DAYS_IN_PLAN - 1))
            .ok_or_else(|| AppError::invalid_input("Plan range overflows the calendar"))?;
        let planned = resources
            .database
            .get_planned_days(user_id, start, end)
            .await?;

        Ok(start
            .iter_days()
            .take_while(|day| *day <= end)
            .map(|day| {
                let meal = planned
                    .iter()
                    .find(|planned| planned.day == day)
                    .map(|planned| planned.recipe.name.clone());
                (day, meal)
            })
            .collect())
    }

    /// Handle GET /meals - Datalist options for recipe names containing `meal`
    async fn handle_meals(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<MealQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let names: Vec<String> = resources
            .database
            .search_recipes(user.id, &query.meal)
            .await?
            .into_iter()
            .map(|recipe| recipe.name)
            .collect();
        Ok(Html(components::meal_options(&names)).into_response())
    }

    /// Handle POST /planned_day - Plan the named recipe, answered with an HTMX trigger
    async fn handle_plan_day(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        form: Result<Form<PlannedDayForm>, FormRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let result = match form {
            Ok(Form(form)) => Self::plan_by_name(&resources, user.id, &form).await,
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        };

        let trigger = match result {
            Ok(()) => SHOW_SUCCESS,
            Err(e) => {
                warn!(user.id = user.id, error = %e, "Day not planned");
                SHOW_ERROR
            }
        };
        let mut response = ().into_response();
        response
            .headers_mut()
            .insert("HX-Trigger", HeaderValue::from_static(trigger));
        Ok(response)
    }

    async fn plan_by_name(
        resources: &ServerResources,
        user_id: UserId,
        form: &PlannedDayForm,
    ) -> AppResult<()> {
        let name = form.meal.trim();
        let recipe = resources
            .database
            .get_recipe_by_name(user_id, name)
            .await?
            .ok_or_else(|| RecipeError::recipe_not_found(name))?;
        resources
            .database
            .plan_day(user_id, form.day, recipe.id)
            .await?;
        Ok(())
    }

    /// Handle GET /summary - Summary table
    async fn handle_summary(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let summary = resources.database.summarise_plans(user.id).await?;
        Ok(Html(components::summary_table(&summary)).into_response())
    }
}
