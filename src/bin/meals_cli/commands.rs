// ABOUTME: Subcommand implementations for meals-cli
// ABOUTME: Loads recipe YAML files and plans meals by recipe name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::client::{CreateOutcome, MealsClient};
use meals::models::{CreateRecipeRequest, PlannedDayRequest};

/// Read a YAML list of recipes
pub fn load_recipes(path: &Path) -> Result<Vec<CreateRecipeRequest>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("{} is not a list of recipes", path.display()))
}

/// Create every recipe in the file, reporting conflicts and continuing
pub async fn populate(client: &MealsClient, path: &Path) -> Result<()> {
    let recipes = load_recipes(path)?;
    let mut created = 0;
    for recipe in &recipes {
        match client.create_recipe(recipe).await? {
            CreateOutcome::Created(stored) => {
                created += 1;
                println!(
                    "Created '{}' with {} ingredients",
                    stored.name,
                    stored.ingredients.len()
                );
            }
            CreateOutcome::AlreadyExists => println!("Skipped '{}': already exists", recipe.name),
        }
    }
    println!("{created} of {} recipes created", recipes.len());
    Ok(())
}

/// Plan the recipe called `name` on `day`
pub async fn plan(client: &MealsClient, name: &str, day: NaiveDate) -> Result<()> {
    let recipe = client
        .recipe_by_name(name)
        .await
        .with_context(|| format!("Recipe '{name}' not found"))?;
    let planned = client
        .plan_day(&PlannedDayRequest {
            day,
            recipe_id: recipe.id,
        })
        .await?;
    println!("Planned '{}' for {}", planned.recipe.name, planned.day);
    Ok(())
}
