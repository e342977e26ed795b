// ABOUTME: Domain error types for recipes, ingredients, timings and users
// ABOUTME: Provides structured errors that convert into the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Recipe Error Types
//!
//! Structured errors raised by the ingredient parser and the recipe store,
//! with a conversion into [`AppError`] for HTTP response formatting.

use std::error::Error;
use std::fmt;

use serde_json::json;

use super::{AppError, ErrorCode};

/// Message shown for any ingredient line that cannot be decomposed
pub const MALFORMED_INGREDIENT_MESSAGE: &str =
    "Expected ingredient to be in form: 'name quantity unit'. Where quantity is a number.";

/// Errors specific to recipe management.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeError {
    /// An ingredient entry does not have the `name quantity unit` shape
    MalformedIngredient {
        /// One-based position of the ingredient in the submitted list
        index: usize,
        /// Reason the entry was rejected
        message: String,
    },
    /// The owner already has a recipe with this name
    RecipeAlreadyExists {
        /// Conflicting recipe name
        name: String,
    },
    /// No recipe with this identity is visible to the caller
    RecipeNotFound {
        /// Requested recipe identifier or name
        recipe: String,
    },
    /// The user already stored timings
    TimingAlreadyExists,
    /// A user with this name is already registered
    UserAlreadyExists {
        /// Conflicting user name
        user_name: String,
    },
}

impl RecipeError {
    /// Create a "malformed ingredient" error with the standard message
    #[must_use]
    pub fn malformed_ingredient(index: usize) -> Self {
        Self::MalformedIngredient {
            index,
            message: MALFORMED_INGREDIENT_MESSAGE.to_owned(),
        }
    }

    /// Create a "recipe already exists" error
    #[must_use]
    pub fn recipe_already_exists(name: impl Into<String>) -> Self {
        Self::RecipeAlreadyExists { name: name.into() }
    }

    /// Create a "recipe not found" error
    #[must_use]
    pub fn recipe_not_found(recipe: impl fmt::Display) -> Self {
        Self::RecipeNotFound {
            recipe: recipe.to_string(),
        }
    }

    /// Create a "user already exists" error
    #[must_use]
    pub fn user_already_exists(user_name: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            user_name: user_name.into(),
        }
    }

    /// Error code used when converting into [`AppError`]
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedIngredient { .. } => ErrorCode::InvalidFormat,
            Self::RecipeAlreadyExists { .. }
            | Self::TimingAlreadyExists
            | Self::UserAlreadyExists { .. } => ErrorCode::ResourceAlreadyExists,
            Self::RecipeNotFound { .. } => ErrorCode::ResourceNotFound,
        }
    }
}

impl fmt::Display for RecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedIngredient { index, message } => {
                write!(f, "Issue with ingredient {index}: {message}")
            }
            Self::RecipeAlreadyExists { .. } => {
                write!(f, "Recipe already exists. Choose a different name.")
            }
            Self::RecipeNotFound { recipe } => write!(f, "Recipe '{recipe}' does not exist"),
            Self::TimingAlreadyExists => write!(
                f,
                "Timings already exist for this user. Update them instead."
            ),
            Self::UserAlreadyExists { user_name } => {
                write!(f, "User '{user_name}' already exists")
            }
        }
    }
}

impl Error for RecipeError {}

impl From<RecipeError> for AppError {
    fn from(error: RecipeError) -> Self {
        let code = error.code();
        let message = error.to_string();
        let app_error = Self::new(code, message);
        match error {
            RecipeError::MalformedIngredient { index, message } => {
                app_error.with_details(json!({
                    "ingredients": [{ "index": index, "message": message }]
                }))
            }
            RecipeError::RecipeAlreadyExists { name } => app_error.with_resource_id(name),
            RecipeError::RecipeNotFound { recipe } => app_error.with_resource_id(recipe),
            RecipeError::UserAlreadyExists { user_name } => app_error.with_resource_id(user_name),
            RecipeError::TimingAlreadyExists => app_error,
        }
    }
}

/// Combine several malformed-ingredient failures into one validation error.
///
/// The message lists every failing entry on its own line and `details`
/// carries `{"ingredients": [{"index", "message"}, ..]}` so clients can
/// highlight each field.
#[must_use]
pub fn malformed_ingredients(errors: &[RecipeError]) -> AppError {
    let entries: Vec<_> = errors
        .iter()
        .filter_map(|error| match error {
            RecipeError::MalformedIngredient { index, message } => {
                Some(json!({ "index": index, "message": message }))
            }
            _ => None,
        })
        .collect();
    let message = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    AppError::new(ErrorCode::InvalidFormat, message).with_details(json!({ "ingredients": entries }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_ingredient_message() {
        let error = RecipeError::malformed_ingredient(2);
        assert_eq!(
            error.to_string(),
            format!("Issue with ingredient 2: {MALFORMED_INGREDIENT_MESSAGE}")
        );
        assert_eq!(error.code(), ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let app_error: AppError = RecipeError::recipe_already_exists("Soup").into();
        assert_eq!(app_error.http_status(), 409);
        assert_eq!(
            app_error.message,
            "Recipe already exists. Choose a different name."
        );
        assert_eq!(app_error.context.resource_id.as_deref(), Some("Soup"));

        let app_error: AppError = RecipeError::TimingAlreadyExists.into();
        assert_eq!(app_error.http_status(), 409);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let app_error: AppError = RecipeError::recipe_not_found(42).into();
        assert_eq!(app_error.http_status(), 404);
        assert_eq!(app_error.context.resource_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_malformed_ingredients_lists_every_index() {
        let errors = vec![
            RecipeError::malformed_ingredient(1),
            RecipeError::malformed_ingredient(3),
        ];
        let app_error = malformed_ingredients(&errors);

        assert_eq!(app_error.http_status(), 400);
        assert_eq!(app_error.message.lines().count(), 2);
        assert_eq!(app_error.context.details["ingredients"][0]["index"], 1);
        assert_eq!(app_error.context.details["ingredients"][1]["index"], 3);
    }
}
