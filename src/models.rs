// ABOUTME: Domain models and JSON payloads for users, recipes, timings and plans
// ABOUTME: Holds request validation that turns raw client input into recipe drafts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Data Models
//!
//! Identifiers are the `SQLite` row ids. Ingredient identities are shared
//! between recipes; a [`RecipeIngredient`] is the per-recipe association that
//! carries quantity and unit.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{malformed_ingredients, AppError, AppResult, RecipeError};
use crate::ingredients::parser::{is_ingredient_word, parse_ingredient_line};

/// Row id of a user
pub type UserId = i64;
/// Row id of a recipe
pub type RecipeId = i64;
/// Row id of a shared ingredient identity
pub type IngredientId = i64;
/// Row id of a recipe/ingredient association
pub type AssociationId = i64;

// ============================================================================
// Users
// ============================================================================

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Row id
    pub id: UserId,
    /// Unique user name, also the basic auth username
    pub user_name: String,
}

/// Body of `POST /api/v1/users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// Requested user name
    pub user_name: String,
}

// ============================================================================
// Ingredients
// ============================================================================

/// A validated ingredient entry: name, quantity and unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRequest {
    /// Ingredient name, matched case-sensitively against existing identities
    pub name: String,
    /// Amount, may be fractional
    pub quantity: f64,
    /// Free text unit such as "cups" or "units"
    pub unit: String,
}

impl fmt::Display for IngredientRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.quantity, self.unit)
    }
}

/// An ingredient as submitted by a client
///
/// JSON clients may send either a `"Flour 2 cups"` line or an object with
/// `name`, `quantity` and `unit`. Extra object fields (such as the `id` of a
/// previously returned association) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientInput {
    /// Free text line parsed with [`parse_ingredient_line`]
    Line(String),
    /// Already structured entry
    Structured(IngredientRequest),
}

impl IngredientInput {
    /// Validate this entry. `index` is the one-based position used in messages.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::MalformedIngredient`] when the line does not parse
    /// or a structured entry has a name or unit the line parser would reject
    /// or a quantity that is negative or not finite
    pub fn into_request(self, index: usize) -> Result<IngredientRequest, RecipeError> {
        match self {
            Self::Line(line) => parse_ingredient_line(&line)
                .map(IngredientRequest::from)
                .map_err(|_| RecipeError::malformed_ingredient(index)),
            Self::Structured(request) => {
                let name = request.name.trim();
                let unit = request.unit.trim();
                if !is_ingredient_word(name)
                    || !is_ingredient_word(unit)
                    || !request.quantity.is_finite()
                    || request.quantity < 0.0
                {
                    return Err(RecipeError::malformed_ingredient(index));
                }
                Ok(IngredientRequest {
                    name: name.to_owned(),
                    quantity: request.quantity,
                    unit: unit.to_owned(),
                })
            }
        }
    }
}

/// One ingredient of a stored recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Association id (stable while the ingredient stays on the recipe)
    pub id: AssociationId,
    /// Shared ingredient identity
    pub ingredient_id: IngredientId,
    /// Ingredient name
    pub name: String,
    /// Amount
    pub quantity: f64,
    /// Unit
    pub unit: String,
}

impl fmt::Display for RecipeIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.quantity, self.unit)
    }
}

// ============================================================================
// Recipes
// ============================================================================

/// A stored recipe with its ingredients ordered by association id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Row id
    pub id: RecipeId,
    /// Name, unique per user
    pub name: String,
    /// Free text instructions
    pub instructions: String,
    /// Ingredient associations
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// HTML anchor used by the contents list
    #[must_use]
    pub fn anchor(&self) -> String {
        self.name.replace(' ', "-")
    }

    /// Ingredient lines in the `name quantity unit` form accepted by the parser
    #[must_use]
    pub fn ingredient_lines(&self) -> Vec<String> {
        self.ingredients.iter().map(ToString::to_string).collect()
    }
}

/// Body of `POST /api/v1/recipes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecipeRequest {
    /// Recipe name
    pub name: String,
    /// Ingredient lines or objects
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// Instructions
    #[serde(default)]
    pub instructions: String,
}

/// Body of `PUT /api/v1/recipes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    /// Recipe to update
    pub id: RecipeId,
    /// New name
    pub name: String,
    /// Target ingredient list
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    /// New instructions
    #[serde(default)]
    pub instructions: String,
}

/// A validated recipe ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    /// Trimmed, non-empty name
    pub name: String,
    /// Instructions, empty only when there are no ingredients
    pub instructions: String,
    /// Validated ingredients in submission order
    pub ingredients: Vec<IngredientRequest>,
}

impl RecipeDraft {
    /// Validate raw client input.
    ///
    /// Every ingredient is checked so the error lists all failing positions.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_FORMAT` listing each malformed ingredient, or
    /// `INVALID_INPUT` for an empty name or missing instructions
    pub fn new(
        name: &str,
        instructions: impl Into<String>,
        inputs: Vec<IngredientInput>,
    ) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("Recipe name must not be empty"));
        }

        let mut ingredients = Vec::with_capacity(inputs.len());
        let mut failures = Vec::new();
        for (position, input) in inputs.into_iter().enumerate() {
            match input.into_request(position + 1) {
                Ok(request) => ingredients.push(request),
                Err(error) => failures.push(error),
            }
        }
        if !failures.is_empty() {
            return Err(malformed_ingredients(&failures));
        }

        let instructions = instructions.into();
        if instructions.trim().is_empty() && !ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "Instructions must not be empty when the recipe has ingredients",
            ));
        }

        Ok(Self {
            name: name.to_owned(),
            instructions,
            ingredients,
        })
    }
}

impl TryFrom<CreateRecipeRequest> for RecipeDraft {
    type Error = AppError;

    fn try_from(request: CreateRecipeRequest) -> AppResult<Self> {
        Self::new(&request.name, request.instructions, request.ingredients)
    }
}

/// Query of `GET /api/v1/recipes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeListQuery {
    /// Only list recipes with at least one ingredient (default true)
    pub has_ingredients: Option<bool>,
}

/// Query of `GET /api/v1/recipes/search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeNameQuery {
    /// Exact recipe name
    pub name: String,
}

/// Query of `GET /api/v1/recipes/like`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSnippetQuery {
    /// Case-insensitive substring
    pub snippet: String,
}

// ============================================================================
// Timings
// ============================================================================

/// One step of a timing schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingStep {
    /// What to do, sent as `step` on the wire
    #[serde(rename = "step")]
    pub description: String,
    /// Minutes relative to the finish time, never positive
    pub offset: i64,
}

/// Body of the timings create and update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingsRequest {
    /// Target finish time
    pub finish_time: NaiveTime,
    /// Ordered steps
    pub steps: Vec<TimingStep>,
}

impl TimingsRequest {
    /// Check that no step happens after the finish time
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` naming the first step with a positive offset
    pub fn validate(&self) -> AppResult<()> {
        if let Some((position, step)) = self
            .steps
            .iter()
            .enumerate()
            .find(|(_, step)| step.offset > 0)
        {
            return Err(AppError::new(
                crate::errors::ErrorCode::ValueOutOfRange,
                format!(
                    "Step {} '{}' has offset {}; offsets must be zero or negative",
                    position + 1,
                    step.description,
                    step.offset
                ),
            ));
        }
        Ok(())
    }
}

/// A user's stored timing schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// Row id, `None` for the unsaved default schedule
    pub id: Option<i64>,
    /// Target finish time
    pub finish_time: NaiveTime,
    /// Ordered steps
    pub steps: Vec<TimingStep>,
}

impl Timings {
    /// Schedule shown before the user saved one: 18:00 with a single finish step
    #[must_use]
    pub fn default_schedule() -> Self {
        use crate::constants::timings::{DEFAULT_FINISH_HOUR, DEFAULT_STEP_DESCRIPTION};

        Self {
            id: None,
            finish_time: NaiveTime::from_hms_opt(DEFAULT_FINISH_HOUR, 0, 0).unwrap_or_default(),
            steps: vec![TimingStep {
                description: DEFAULT_STEP_DESCRIPTION.to_owned(),
                offset: 0,
            }],
        }
    }
}

/// Parse a clock time as sent by an HTML time input (`18:00`) or JSON (`18:00:00`)
#[must_use]
pub fn parse_clock_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

// ============================================================================
// Planner
// ============================================================================

/// Body of `POST /api/v1/planned_day`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedDayRequest {
    /// Calendar day
    pub day: NaiveDate,
    /// Recipe to cook that day
    pub recipe_id: RecipeId,
}

/// Recipe reference inside a planned day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRecipe {
    /// Recipe row id
    pub id: RecipeId,
    /// Recipe name
    pub name: String,
}

/// A day with its planned recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedDay {
    /// Calendar day
    pub day: NaiveDate,
    /// Planned recipe
    pub recipe: PlannedRecipe,
}

/// Query of `GET /api/v1/planned_day`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRangeQuery {
    /// First day, inclusive
    pub start_date: NaiveDate,
    /// Last day, inclusive
    pub end_date: NaiveDate,
}

/// How often and how recently a recipe was planned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe name
    pub name: String,
    /// Number of planned days
    pub count: i64,
    /// Latest planned day, `None` if never planned
    pub last_eaten: Option<NaiveDate>,
}
