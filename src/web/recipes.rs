// ABOUTME: HTML handlers for listing, editing and creating recipes
// ABOUTME: Parses form ingredient lines and renders sections or error boxes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use serde::Deserialize;
use tracing::{error, warn};

use super::components;
use crate::auth::authenticate;
use crate::errors::{AppError, ErrorCode, RecipeError};
use crate::models::{IngredientInput, RecipeDraft, RecipeId};
use crate::resources::ServerResources;

/// Recipe form as posted by the new and edit pages
///
/// `ingredients` repeats once per input line.
#[derive(Debug, Deserialize)]
pub struct RecipeForm {
    /// Recipe name
    pub name: String,
    /// Instructions
    #[serde(default)]
    pub instructions: String,
    /// Ingredient lines such as `Flour 2 cups`
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl RecipeForm {
    fn into_draft(self) -> Result<RecipeDraft, AppError> {
        let inputs = self
            .ingredients
            .into_iter()
            .map(IngredientInput::Line)
            .collect();
        RecipeDraft::new(&self.name, self.instructions, inputs)
    }
}

/// Recipe page routes handler
pub struct RecipePages;

impl RecipePages {
    /// Create all recipe page routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index))
            .route("/recipes", get(Self::handle_recipes))
            .route("/recipe_list", get(Self::handle_recipe_list))
            .route("/recipe/:id", get(Self::handle_recipe))
            .route("/recipe/:id/edit", get(Self::handle_edit))
            .route("/update_recipe/:id", post(Self::handle_update))
            .route("/new.html", get(Self::handle_new_page))
            .route("/new_recipe", post(Self::handle_new_recipe))
            .with_state(resources)
    }

    /// Handle GET / - Index page
    async fn handle_index(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources.database).await?;
        Ok(Html(components::page(&components::index_content())).into_response())
    }

    /// Handle GET /recipes - All recipes as editable sections
    async fn handle_recipes(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipes = resources.database.list_recipes(user.id, false).await?;
        Ok(Html(components::recipes_main(&recipes)).into_response())
    }

    /// Handle GET /recipe_list - Contents links
    async fn handle_recipe_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let recipes = resources.database.list_recipes(user.id, false).await?;
        Ok(Html(components::recipe_names(&recipes)).into_response())
    }

    /// Handle GET /recipe/:id - One editable section
    async fn handle_recipe(
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
        Ok(Html(components::editable_recipe_section(&recipe)).into_response())
    }

    /// Handle GET /recipe/:id/edit - Edit form
    async fn handle_edit(
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
        Ok(Html(components::edit_recipe_form(&recipe)).into_response())
    }

    /// Handle POST /update_recipe/:id - Save an edited recipe
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<RecipeId>,
        Form(form): Form<RecipeForm>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let result = match form.into_draft() {
            Ok(draft) => resources.database.update_recipe(user.id, id, &draft).await,
            Err(e) => Err(e),
        };

        let html = match result {
            Ok(recipe) => components::editable_recipe_section(&recipe),
            Err(e) => {
                warn!(recipe.id = id, error = %e, "Recipe update rejected");
                components::update_recipe_error(&e)
            }
        };
        Ok(Html(html).into_response())
    }

    /// Handle GET /new.html - New recipe page
    async fn handle_new_page(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources.database).await?;
        Ok(Html(components::page(&components::new_recipe_content())).into_response())
    }

    /// Handle POST /new_recipe - Create a recipe from the form
    async fn handle_new_recipe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Form(form): Form<RecipeForm>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources.database).await?;
        let result = match form.into_draft() {
            Ok(draft) => {
                resources
                    .database
                    .create_recipe_with_ingredients(user.id, &draft)
                    .await
            }
            Err(e) => Err(e),
        };

        let html = match result {
            Ok(recipe) => components::recipe_section(&recipe),
            Err(e) => {
                match e.code {
                    ErrorCode::InvalidFormat
                    | ErrorCode::InvalidInput
                    | ErrorCode::ResourceAlreadyExists => {
                        warn!(error = %e, "Recipe creation rejected");
                    }
                    _ => error!(error = %e, "Unexpected error adding a recipe"),
                }
                components::new_recipe_error(&e)
            }
        };
        Ok(Html(html).into_response())
    }
}
