// ABOUTME: HTML handlers for the timing editor page
// ABOUTME: Serves the stored or default schedule and saves edits from the Alpine form
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tracing::warn;

use super::components;
use crate::auth::authenticate;
use crate::errors::{AppError, AppResult};
use crate::models::{parse_clock_time, TimingStep, Timings, TimingsRequest};
use crate::resources::ServerResources;

/// Timing editor submission: a clock time and the steps as a JSON array
#[derive(Debug, Deserialize)]
pub struct TimingsForm {
    /// `HH:MM` or `HH:MM:SS`
    pub finish_time: String,
    /// JSON encoded `[{step, offset}]`
    pub steps: String,
}

impl TryFrom<TimingsForm> for TimingsRequest {
    type Error = AppError;

    fn try_from(form: TimingsForm) -> AppResult<Self> {
        let finish_time = parse_clock_time(&form.finish_time).ok_or_else(|| {
            AppError::invalid_input(format!("'{}' is not a clock time", form.finish_time))
        })?;
        let steps: Vec<TimingStep> = serde_json::from_str(&form.steps)?;
        let request = Self { finish_time, steps };
        request.validate()?;
        Ok(request)
    }
}

/// Timing page routes handler
pub struct TimingPages;

impl TimingPages {
    /// Create all timing page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/timings.html", get(Self::handle_page))
            .route(
                "/timings",
                get(Self::handle_editor).patch(Self::handle_save),
            )
            .with_state(resources)
    }

    /// Handle GET /timings.html - Timings page
    async fn handle_page(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources.database).await?;
        Ok(Html(components::page(&components::timings_content())).into_response())
    }

    /// Handle GET /timings - Editor seeded with the stored or default schedule
    async fn handle_editor(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let timings = resources
            .database
            .get_timings(user.id)
            .await?
            .unwrap_or_else(Timings::default_schedule);
        Ok(Html(components::timings_editor(&timings)).into_response())
    }

    /// Handle PATCH /timings - Save the edited schedule
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        form: Result<Form<TimingsForm>, FormRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let result = match form {
            Ok(Form(form)) => match TimingsRequest::try_from(form) {
                Ok(request) => resources
                    .database
                    .upsert_timings(user.id, &request)
                    .await
                    .map(|_| ()),
                Err(e) => Err(e),
            },
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        };

        let html = match result {
            Ok(()) => components::success_box("Timing saved successfully"),
            Err(e) => {
                warn!(user.id = user.id, error = %e, "Timings not saved");
                components::error_box("Error saving timings")
            }
        };
        Ok(Html(html).into_response())
    }
}
