// ABOUTME: Ingredient core: free-text line parsing and ingredient list reconciliation
// ABOUTME: Pure logic plus the IngredientStore seam used to resolve shared identities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Ingredients
//!
//! - [`parser`] turns `"Flour 2 cups"` into a name, quantity and unit.
//! - [`reconcile`] diffs a recipe's current ingredients against a requested
//!   list and resolves ingredient identities by name through [`IngredientStore`].

/// Free-text ingredient line parser
pub mod parser;

/// Ingredient list reconciliation
pub mod reconcile;

pub use parser::{parse_ingredient_line, MalformedIngredientError, ParsedIngredient};
pub use reconcile::{
    merge_duplicate_requests, plan_reconciliation, reconcile_with_store, resolve_ingredient,
    AssociationChanges, ExistingAssociation, IngredientStore, IngredientUpdate, NewAssociation,
    ReconciliationPlan,
};
