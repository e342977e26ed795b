// ABOUTME: Server-rendered HTML pages and HTMX fragments behind basic auth
// ABOUTME: Merges the recipe, timings and planner page routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # HTML front end
//!
//! Full pages are served at `/`, `/new.html`, `/timings.html` and
//! `/plan.html`; everything else returns a fragment swapped in by HTMX.
//! Fragment handlers answer failures with status 200 and an error box
//! because HTMX does not swap non-2xx responses.

/// HTML rendering helpers
pub mod components;
/// Meal planner pages
pub mod planner;
/// Recipe list, edit and creation pages
pub mod recipes;
/// Timing editor pages
pub mod timings;

pub use planner::PlannerPages;
pub use recipes::RecipePages;
pub use timings::TimingPages;

use std::sync::Arc;

use axum::Router;

use crate::resources::ServerResources;

/// Every HTML route
pub fn web_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(RecipePages::routes(Arc::clone(resources)))
        .merge(TimingPages::routes(Arc::clone(resources)))
        .merge(PlannerPages::routes(Arc::clone(resources)))
}
