// ABOUTME: Planned day database operations for the weekly meal planner
// ABOUTME: Assigns one recipe per user and day and summarises how often recipes were eaten
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::Database;
use crate::errors::{AppError, AppResult, RecipeError};
use crate::models::{PlannedDay, PlannedRecipe, RecipeId, RecipeSummary, UserId};

const DAY_FORMAT: &str = "%Y-%m-%d";

impl Database {
    /// Create the `planned_days` table
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS planned_days (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                day TEXT NOT NULL,
                recipe_id INTEGER NOT NULL REFERENCES recipes(id) ON DELETE CASCADE,
                UNIQUE(user_id, day)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_planned_days_recipe ON planned_days(recipe_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Plan a recipe for a day, replacing whatever was planned before
    ///
    /// # Errors
    ///
    /// Returns [`RecipeError::RecipeNotFound`] if the recipe is not the user's
    pub async fn plan_day(&self, user_id: UserId, day: NaiveDate, recipe_id: RecipeId) -> AppResult<PlannedDay> {
        let mut tx = self.begin_write().await?;
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(recipe_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::from(RecipeError::recipe_not_found(recipe_id)))?;

        sqlx::query(
            r"
            INSERT INTO planned_days (user_id, day, recipe_id) VALUES ($1, $2, $3)
            ON CONFLICT(user_id, day) DO UPDATE SET recipe_id = excluded.recipe_id
            ",
        )
        .bind(user_id)
        .bind(day.format(DAY_FORMAT).to_string())
        .bind(recipe_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to plan {day}: {e}")))?;
        tx.commit().await?;

        info!(user.id = user_id, recipe.id = recipe_id, %day, "Day planned");
        Ok(PlannedDay {
            day,
            recipe: PlannedRecipe { id: recipe_id, name },
        })
    }

    /// Planned days between two dates, both inclusive, ordered by day
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_planned_days(
        &self,
        user_id: UserId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<PlannedDay>> {
        let rows = sqlx::query(
            r"
            SELECT p.day, r.id AS recipe_id, r.name
            FROM planned_days p
            JOIN recipes r ON r.id = p.recipe_id
            WHERE p.user_id = $1 AND p.day BETWEEN $2 AND $3
            ORDER BY p.day
            ",
        )
        .bind(user_id)
        .bind(start.format(DAY_FORMAT).to_string())
        .bind(end.format(DAY_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get planned days: {e}")))?;

        rows.iter().map(row_to_planned_day).collect()
    }

    /// Every recipe of the user with its plan count and last planned day,
    /// ordered by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn summarise_plans(&self, user_id: UserId) -> AppResult<Vec<RecipeSummary>> {
        let rows = sqlx::query(
            r"
            SELECT r.name, COUNT(p.id) AS count, MAX(p.day) AS last_eaten
            FROM recipes r
            LEFT JOIN planned_days p ON p.recipe_id = r.id
            WHERE r.user_id = $1
            GROUP BY r.id, r.name
            ORDER BY r.name
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to summarise plans: {e}")))?;

        rows.iter().map(row_to_summary).collect()
    }
}

fn parse_day(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|e| AppError::database(format!("Stored day '{value}' is not a date: {e}")))
}

fn row_to_planned_day(row: &SqliteRow) -> AppResult<PlannedDay> {
    let day: String = row.try_get("day")?;
    Ok(PlannedDay {
        day: parse_day(&day)?,
        recipe: PlannedRecipe {
            id: row.try_get("recipe_id")?,
            name: row.try_get("name")?,
        },
    })
}

fn row_to_summary(row: &SqliteRow) -> AppResult<RecipeSummary> {
    let last_eaten: Option<String> = row.try_get("last_eaten")?;
    Ok(RecipeSummary {
        name: row.try_get("name")?,
        count: row.try_get("count")?,
        last_eaten: last_eaten.as_deref().map(parse_day).transpose()?,
    })
}
