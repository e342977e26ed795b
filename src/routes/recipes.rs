// ABOUTME: Route handlers for the recipes REST API
// ABOUTME: Create, update, search and delete recipes with reconciled ingredient lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! Recipe routes
//!
//! Ingredients may be sent as `"Flour 2 cups"` lines or as objects. Invalid
//! lines are reported together as one `INVALID_FORMAT` error whose details
//! list every failing one-based index.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::auth::authenticate;
use crate::constants::api::API_V1_PREFIX;
use crate::errors::{AppError, RecipeError};
use crate::models::{
    CreateRecipeRequest, RecipeDraft, RecipeId, RecipeListQuery, RecipeNameQuery,
    RecipeSnippetQuery, UpdateRecipeRequest,
};
use crate::resources::ServerResources;

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                &format!("{API_V1_PREFIX}/recipes"),
                post(Self::handle_create)
                    .get(Self::handle_list)
                    .put(Self::handle_update),
            )
            .route(
                &format!("{API_V1_PREFIX}/recipes/search"),
                get(Self::handle_search),
            )
            .route(&format!("{API_V1_PREFIX}/recipes/like"), get(Self::handle_like))
            .route(
                &format!("{API_V1_PREFIX}/recipes/:id"),
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /api/v1/recipes - Create a recipe
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let draft = RecipeDraft::try_from(body)?;
        let recipe = resources
            .database
            .create_recipe_with_ingredients(user.id, &draft)
            .await?;
        Ok((StatusCode::CREATED, Json(recipe)).into_response())
    }

    /// Handle GET /api/v1/recipes - List recipes ordered by name
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeListQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipes = resources
            .database
            .list_recipes(user.id, query.has_ingredients.unwrap_or(true))
            .await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle PUT /api/v1/recipes - Overwrite a recipe and reconcile its ingredients
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<UpdateRecipeRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let draft = RecipeDraft::new(&body.name, body.instructions, body.ingredients)?;
        let recipe = resources
            .database
            .update_recipe(user.id, body.id, &draft)
            .await?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle GET /api/v1/recipes/search - Exact name lookup
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeNameQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipe = resources
            .database
            .get_recipe_by_name(user.id, &query.name)
            .await?
            .ok_or_else(|| RecipeError::recipe_not_found(&query.name))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle GET /api/v1/recipes/like - Case-insensitive substring search
    async fn handle_like(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<RecipeSnippetQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipes = resources
            .database
            .search_recipes(user.id, &query.snippet)
            .await?;
        Ok((StatusCode::OK, Json(recipes)).into_response())
    }

    /// Handle GET /api/v1/recipes/:id - Get one recipe
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<RecipeId>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipe = resources
            .database
            .get_recipe(id, user.id)
            .await?
            .ok_or_else(|| RecipeError::recipe_not_found(id))?;
        Ok((StatusCode::OK, Json(recipe)).into_response())
    }

    /// Handle DELETE /api/v1/recipes/:id - Delete a recipe
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<RecipeId>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        resources.database.delete_recipe(user.id, id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
