// ABOUTME: Concurrency tests for writes against a file backed SQLite database
// ABOUTME: Racing creates must resolve to one winner and conflict errors, never lock failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::NaiveTime;
use common::{create_test_user, init_test_logging};
use meals::config::database::DatabaseUrl;
use meals::database::Database;
use meals::errors::{AppResult, ErrorCode};
use meals::models::{IngredientInput, RecipeDraft, TimingStep, TimingsRequest};
use tempfile::TempDir;
use tokio::task::JoinHandle;

const ROUNDS: usize = 20;
const WRITERS: usize = 5;

async fn create_file_database() -> (TempDir, Database) {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("meals.db"),
    };
    let database = Database::new(&url).await.unwrap();
    (dir, database)
}

fn draft(name: &str, lines: &[&str]) -> RecipeDraft {
    let inputs = lines
        .iter()
        .map(|line| IngredientInput::Line((*line).to_owned()))
        .collect();
    RecipeDraft::new(name, "Mix and cook", inputs).unwrap()
}

async fn join_all<T>(handles: Vec<JoinHandle<AppResult<T>>>) -> Vec<AppResult<T>> {
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_creates_with_one_name_yield_one_recipe() {
    let (_dir, db) = create_file_database().await;
    let user = create_test_user(&db, "ben").await.unwrap();

    for round in 0..ROUNDS {
        let name = format!("Stew {round}");
        let handles = (0..WRITERS)
            .map(|_| {
                let db = db.clone();
                let recipe = draft(&name, &["Onion 2 units", "Stock 1 litre"]);
                tokio::spawn(async move { db.create_recipe_with_ingredients(user.id, &recipe).await })
            })
            .collect();

        let results = join_all(handles).await;
        let created = results.iter().filter(|result| result.is_ok()).count();
        assert_eq!(created, 1, "round {round}: exactly one create wins");
        for error in results.into_iter().filter_map(Result::err) {
            assert_eq!(
                error.code,
                ErrorCode::ResourceAlreadyExists,
                "round {round}: unexpected failure {error}"
            );
            assert_eq!(error.context.resource_id.as_deref(), Some(name.as_str()));
        }

        let stored = db.get_recipe_by_name(user.id, &name).await.unwrap().unwrap();
        assert_eq!(stored.ingredients.len(), 2);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_creates_share_new_ingredient() {
    let (_dir, db) = create_file_database().await;
    let user = create_test_user(&db, "ben").await.unwrap();

    let handles = (0..WRITERS)
        .map(|index| {
            let db = db.clone();
            let recipe = draft(&format!("Saffron dish {index}"), &["Saffron 1 pinch"]);
            tokio::spawn(async move { db.create_recipe_with_ingredients(user.id, &recipe).await })
        })
        .collect();

    let recipes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|result| result.unwrap())
        .collect();

    let saffron = db.find_ingredient_by_name("Saffron").await.unwrap().unwrap();
    for recipe in &recipes {
        assert_eq!(recipe.ingredients[0].ingredient_id, saffron);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_timing_creates_conflict_cleanly() {
    let (_dir, db) = create_file_database().await;
    let user = create_test_user(&db, "ben").await.unwrap();
    let request = TimingsRequest {
        finish_time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        steps: vec![TimingStep {
            description: "Preheat oven".to_owned(),
            offset: -45,
        }],
    };

    let handles = (0..WRITERS)
        .map(|_| {
            let db = db.clone();
            let request = request.clone();
            tokio::spawn(async move { db.create_timings(user.id, &request).await })
        })
        .collect();

    let results = join_all(handles).await;
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    for error in results.into_iter().filter_map(Result::err) {
        assert_eq!(error.code, ErrorCode::ResourceAlreadyExists, "unexpected failure {error}");
    }
}
