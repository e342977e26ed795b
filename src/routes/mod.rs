// ABOUTME: Route module organization for the meals JSON API
// ABOUTME: Groups handlers by resource with one Routes struct per group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! JSON API routes
//!
//! Each group exposes `routes(resources)` returning a stateless [`axum::Router`]
//! that the server merges. Handlers authenticate, delegate to the database
//! and map results to status codes.

/// Health check route
pub mod health;
/// Planned day and summary routes
pub mod plans;
/// Recipe CRUD and search routes
pub mod recipes;
/// Timing schedule routes
pub mod timings;
/// User registration routes
pub mod users;

pub use health::HealthRoutes;
pub use plans::PlanRoutes;
pub use recipes::RecipeRoutes;
pub use timings::TimingRoutes;
pub use users::UserRoutes;

use std::sync::Arc;

use axum::Router;

use crate::resources::ServerResources;

/// Every JSON route, health check included
pub fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(UserRoutes::routes(Arc::clone(resources)))
        .merge(RecipeRoutes::routes(Arc::clone(resources)))
        .merge(TimingRoutes::routes(Arc::clone(resources)))
        .merge(PlanRoutes::routes(Arc::clone(resources)))
}
