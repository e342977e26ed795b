// ABOUTME: Re-exports the unified error types from the meals-core crate
// ABOUTME: Keeps `crate::errors` paths stable for the rest of the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! Error types live in `meals-core`; this module re-exports them.

pub use meals_core::errors::recipe::{malformed_ingredients, MALFORMED_INGREDIENT_MESSAGE};
pub use meals_core::errors::{
    AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse, ErrorResponseDetails, RecipeError,
};
