// ABOUTME: Recipe and shared ingredient database operations
// ABOUTME: Creates, reads, reconciles and deletes recipes inside single transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqliteConnection, Transaction};

use super::Database;
use crate::errors::{AppError, AppResult, ErrorCode, RecipeError};
use crate::ingredients::reconcile::{
    reconcile_with_store, AssociationChanges, ExistingAssociation, IngredientStore,
};
use crate::logging::AppLogger;
use crate::models::{
    IngredientId, IngredientRequest, Recipe, RecipeDraft, RecipeId, RecipeIngredient, UserId,
};

const RECIPE_COLUMNS: &str = "r.id, r.name, r.instructions";

const ASSOCIATION_COLUMNS: &str =
    "ri.id, ri.recipe_id, ri.ingredient_id, i.name, ri.quantity, ri.unit";

impl Database {
    /// Create recipes, ingredients and `recipe_ingredients` tables
    pub(super) async fn migrate_recipes(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                instructions TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, name)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Names compare with BINARY collation: "Carrot" and "carrot" are distinct
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS recipe_ingredients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                ingredient_id INTEGER NOT NULL REFERENCES ingredients(id),
                quantity REAL NOT NULL,
                unit TEXT NOT NULL,
                UNIQUE(recipe_id, ingredient_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_recipes_user_name ON recipes(user_id, name)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_recipe_ingredients_recipe ON recipe_ingredients(recipe_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a recipe and attach its ingredients, resolving each by name.
    ///
    /// The duplicate name check happens before any ingredient identity is
    /// created and the whole operation is one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::RecipeAlreadyExists`] if the user already has a
    /// recipe with this name, or a database error
    pub async fn create_recipe_with_ingredients(
        &self,
        user_id: UserId,
        draft: &RecipeDraft,
    ) -> AppResult<Recipe> {
        let mut tx = self.begin_write().await?;

        if find_recipe_id_by_name(&mut *tx, user_id, &draft.name)
            .await?
            .is_some()
        {
            return Err(RecipeError::recipe_already_exists(&draft.name).into());
        }

        let recipe_id = sqlx::query(
            "INSERT INTO recipes (user_id, name, instructions) VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(&draft.name)
        .bind(&draft.instructions)
        .execute(&mut *tx)
        .await
        .map_err(|e| recipe_conflict(e, &draft.name))?
        .last_insert_rowid();

        reconcile_with_store(&mut *tx, recipe_id, &[], &draft.ingredients).await?;
        tx.commit().await?;

        AppLogger::log_recipe_change("create", user_id, recipe_id, draft.ingredients.len());
        self.require_recipe(recipe_id, user_id).await
    }

    /// Overwrite name and instructions and reconcile the ingredient list
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::RecipeNotFound`] before any change if the recipe
    /// does not belong to the user, [`RecipeError::RecipeAlreadyExists`] if the
    /// new name is used by another recipe of the user, or a database error
    pub async fn update_recipe(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        draft: &RecipeDraft,
    ) -> AppResult<Recipe> {
        let mut tx = self.begin_write().await?;
        ensure_recipe_exists(&mut tx, recipe_id, user_id).await?;

        if let Some(other) = find_recipe_id_by_name(&mut *tx, user_id, &draft.name).await? {
            if other != recipe_id {
                return Err(RecipeError::recipe_already_exists(&draft.name).into());
            }
        }

        sqlx::query(
            r"
            UPDATE recipes
            SET name = $1, instructions = $2, updated_at = CURRENT_TIMESTAMP
            WHERE id = $3
            ",
        )
        .bind(&draft.name)
        .bind(&draft.instructions)
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| recipe_conflict(e, &draft.name))?;

        reconcile_in_transaction(&mut tx, recipe_id, &draft.ingredients).await?;
        tx.commit().await?;

        AppLogger::log_recipe_change("update", user_id, recipe_id, draft.ingredients.len());
        self.require_recipe(recipe_id, user_id).await
    }

    /// Reconcile only the ingredient list of a recipe
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::RecipeNotFound`] before any change if the recipe
    /// does not belong to the user, `INVALID_INPUT` when adding ingredients to
    /// a recipe without instructions, or a database error
    pub async fn reconcile_ingredients(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
        requested: &[IngredientRequest],
    ) -> AppResult<Recipe> {
        let mut tx = self.begin_write().await?;
        let instructions = ensure_recipe_exists(&mut tx, recipe_id, user_id).await?;
        if instructions.trim().is_empty() && !requested.is_empty() {
            return Err(AppError::invalid_input(
                "Instructions must not be empty when the recipe has ingredients",
            ));
        }

        reconcile_in_transaction(&mut tx, recipe_id, requested).await?;
        tx.commit().await?;

        AppLogger::log_recipe_change("reconcile", user_id, recipe_id, requested.len());
        self.require_recipe(recipe_id, user_id).await
    }

    /// Get one of the user's recipes by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe(&self, recipe_id: RecipeId, user_id: UserId) -> AppResult<Option<Recipe>> {
        let query = format!("SELECT {RECIPE_COLUMNS} FROM recipes r WHERE r.id = $1 AND r.user_id = $2");
        let row = sqlx::query(&query)
            .bind(recipe_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get recipe {recipe_id}: {e}")))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut recipe = row_to_recipe(&row)?;
        recipe.ingredients = fetch_associations(&self.pool, recipe_id).await?;
        Ok(Some(recipe))
    }

    /// Get one of the user's recipes by exact name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_recipe_by_name(&self, user_id: UserId, name: &str) -> AppResult<Option<Recipe>> {
        match find_recipe_id_by_name(&self.pool, user_id, name).await? {
            Some(recipe_id) => self.get_recipe(recipe_id, user_id).await,
            None => Ok(None),
        }
    }

    /// List the user's recipes ordered by name
    ///
    /// With `has_ingredients` set, recipes without any ingredient are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_recipes(&self, user_id: UserId, has_ingredients: bool) -> AppResult<Vec<Recipe>> {
        let query = format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes r
            WHERE r.user_id = $1
              AND ($2 = 0 OR EXISTS (SELECT 1 FROM recipe_ingredients ri WHERE ri.recipe_id = r.id))
            ORDER BY r.name
            "
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(has_ingredients)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list recipes: {e}")))?;

        self.with_ingredients(user_id, &rows).await
    }

    /// Recipes whose name contains `snippet`, ignoring ASCII case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search_recipes(&self, user_id: UserId, snippet: &str) -> AppResult<Vec<Recipe>> {
        let query = format!(
            r"
            SELECT {RECIPE_COLUMNS} FROM recipes r
            WHERE r.user_id = $1 AND r.name LIKE $2 ESCAPE '\'
            ORDER BY r.name
            "
        );
        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(format!("%{}%", escape_like(snippet.trim())))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to search recipes: {e}")))?;

        self.with_ingredients(user_id, &rows).await
    }

    /// Delete a recipe with its associations and planned days
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::RecipeNotFound`] if the user has no such recipe
    pub async fn delete_recipe(&self, user_id: UserId, recipe_id: RecipeId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete recipe: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(RecipeError::recipe_not_found(recipe_id).into());
        }
        AppLogger::log_recipe_change("delete", user_id, recipe_id, 0);
        Ok(())
    }

    /// Look up an ingredient identity by exact name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn find_ingredient_by_name(&self, name: &str) -> AppResult<Option<IngredientId>> {
        let mut conn = self.pool.acquire().await?;
        conn.find_ingredient_by_name(name).await
    }

    async fn require_recipe(&self, recipe_id: RecipeId, user_id: UserId) -> AppResult<Recipe> {
        self.get_recipe(recipe_id, user_id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Recipe {recipe_id} vanished after write")))
    }

    /// Attach ingredients to recipe rows with one query over the user's associations
    async fn with_ingredients(&self, user_id: UserId, rows: &[SqliteRow]) -> AppResult<Vec<Recipe>> {
        let mut recipes = rows.iter().map(row_to_recipe).collect::<AppResult<Vec<_>>>()?;
        if recipes.is_empty() {
            return Ok(recipes);
        }

        let query = format!(
            r"
            SELECT {ASSOCIATION_COLUMNS}
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            JOIN recipes r ON r.id = ri.recipe_id
            WHERE r.user_id = $1
            ORDER BY ri.id
            "
        );
        let association_rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to load recipe ingredients: {e}")))?;

        let mut by_recipe: HashMap<RecipeId, Vec<RecipeIngredient>> = HashMap::new();
        for row in &association_rows {
            let recipe_id: RecipeId = row.try_get("recipe_id")?;
            by_recipe
                .entry(recipe_id)
                .or_default()
                .push(row_to_recipe_ingredient(row)?);
        }
        for recipe in &mut recipes {
            recipe.ingredients = by_recipe.remove(&recipe.id).unwrap_or_default();
        }
        Ok(recipes)
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

/// Fails with `RecipeNotFound` unless the recipe belongs to the user; returns its instructions
async fn ensure_recipe_exists(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: RecipeId,
    user_id: UserId,
) -> AppResult<String> {
    sqlx::query_scalar::<_, String>("SELECT instructions FROM recipes WHERE id = $1 AND user_id = $2")
        .bind(recipe_id)
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| RecipeError::recipe_not_found(recipe_id).into())
}

async fn reconcile_in_transaction(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: RecipeId,
    requested: &[IngredientRequest],
) -> AppResult<AssociationChanges> {
    let existing: Vec<ExistingAssociation> = fetch_associations(&mut **tx, recipe_id)
        .await?
        .iter()
        .map(ExistingAssociation::from)
        .collect();
    reconcile_with_store(&mut **tx, recipe_id, &existing, requested).await
}

async fn find_recipe_id_by_name<'e, E>(
    executor: E,
    user_id: UserId,
    name: &str,
) -> AppResult<Option<RecipeId>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, RecipeId>("SELECT id FROM recipes WHERE user_id = $1 AND name = $2")
        .bind(user_id)
        .bind(name)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::database(format!("Failed to look up recipe '{name}': {e}")))
}

async fn fetch_associations<'e, E>(executor: E, recipe_id: RecipeId) -> AppResult<Vec<RecipeIngredient>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let query = format!(
        r"
        SELECT {ASSOCIATION_COLUMNS}
        FROM recipe_ingredients ri
        JOIN ingredients i ON i.id = ri.ingredient_id
        WHERE ri.recipe_id = $1
        ORDER BY ri.id
        "
    );
    let rows = sqlx::query(&query)
        .bind(recipe_id)
        .fetch_all(executor)
        .await
        .map_err(|e| AppError::database(format!("Failed to load ingredients of recipe {recipe_id}: {e}")))?;

    rows.iter().map(row_to_recipe_ingredient).collect()
}

/// Ingredient identities and associations resolved on the caller's connection,
/// normally the connection of an open transaction
#[async_trait]
impl IngredientStore for SqliteConnection {
    async fn find_ingredient_by_name(&mut self, name: &str) -> AppResult<Option<IngredientId>> {
        sqlx::query_scalar::<_, IngredientId>("SELECT id FROM ingredients WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up ingredient '{name}': {e}")))
    }

    async fn create_ingredient(&mut self, name: &str) -> AppResult<IngredientId> {
        // A concurrent insert of the same name fails the UNIQUE constraint and
        // surfaces as RESOURCE_ALREADY_EXISTS
        let result = sqlx::query("INSERT INTO ingredients (name) VALUES ($1)")
            .bind(name)
            .execute(&mut *self)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn persist_association_changes(
        &mut self,
        recipe_id: RecipeId,
        changes: &AssociationChanges,
    ) -> AppResult<()> {
        for association_id in &changes.remove {
            sqlx::query("DELETE FROM recipe_ingredients WHERE id = $1 AND recipe_id = $2")
                .bind(association_id)
                .bind(recipe_id)
                .execute(&mut *self)
                .await
                .map_err(|e| AppError::database(format!("Failed to remove ingredient: {e}")))?;
        }

        for update in &changes.keep {
            sqlx::query(
                "UPDATE recipe_ingredients SET quantity = $1, unit = $2 WHERE id = $3 AND recipe_id = $4",
            )
            .bind(update.quantity)
            .bind(&update.unit)
            .bind(update.association_id)
            .bind(recipe_id)
            .execute(&mut *self)
            .await
            .map_err(|e| AppError::database(format!("Failed to update ingredient: {e}")))?;
        }

        for association in &changes.add {
            sqlx::query(
                r"
                INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, unit)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(recipe_id)
            .bind(association.ingredient_id)
            .bind(association.quantity)
            .bind(&association.unit)
            .execute(&mut *self)
            .await?;
        }

        Ok(())
    }
}

// ============================================================================
// Row mapping
// ============================================================================

fn row_to_recipe(row: &SqliteRow) -> AppResult<Recipe> {
    Ok(Recipe {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        instructions: row.try_get("instructions")?,
        ingredients: Vec::new(),
    })
}

fn row_to_recipe_ingredient(row: &SqliteRow) -> AppResult<RecipeIngredient> {
    Ok(RecipeIngredient {
        id: row.try_get("id")?,
        ingredient_id: row.try_get("ingredient_id")?,
        name: row.try_get("name")?,
        quantity: row.try_get("quantity")?,
        unit: row.try_get("unit")?,
    })
}

/// Map a unique violation on `recipes(user_id, name)` to the domain error
fn recipe_conflict(error: sqlx::Error, name: &str) -> AppError {
    let error = AppError::from(error);
    if error.code == ErrorCode::ResourceAlreadyExists {
        RecipeError::recipe_already_exists(name).into()
    } else {
        error
    }
}

/// Escape `LIKE` wildcards so the snippet matches literally
fn escape_like(snippet: &str) -> String {
    let mut escaped = String::with_capacity(snippet.len());
    for c in snippet.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("soup"), "soup");
    }
}
