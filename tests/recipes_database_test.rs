// ABOUTME: Integration tests for recipe storage and ingredient reconciliation
// ABOUTME: Covers shared ingredient identities, conflicts, ordering and cascades
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

mod common;

use chrono::NaiveDate;
use common::{create_test_database, create_test_user};
use meals::errors::ErrorCode;
use meals::models::{IngredientInput, IngredientRequest, RecipeDraft};

fn draft(name: &str, lines: &[&str]) -> RecipeDraft {
    let inputs = lines
        .iter()
        .map(|line| IngredientInput::Line((*line).to_owned()))
        .collect();
    RecipeDraft::new(name, "Mix and cook", inputs).expect("valid draft")
}

fn request(name: &str, quantity: f64, unit: &str) -> IngredientRequest {
    IngredientRequest {
        name: name.to_owned(),
        quantity,
        unit: unit.to_owned(),
    }
}

#[tokio::test]
async fn test_create_recipe_shares_ingredient_identity() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();

    let soup = db
        .create_recipe_with_ingredients(user.id, &draft("Carrot soup", &["Carrot 10 units", "Stock 1 litre"]))
        .await
        .unwrap();
    let cake = db
        .create_recipe_with_ingredients(user.id, &draft("Carrot cake", &["Carrot 3 units", "Flour 2 cups"]))
        .await
        .unwrap();

    assert_eq!(soup.ingredients.len(), 2);
    assert_eq!(soup.ingredients[0].name, "Carrot");
    assert_eq!(soup.ingredients[0].quantity, 10.0);
    assert_eq!(soup.ingredients[0].unit, "units");
    assert_eq!(soup.ingredients[0].ingredient_id, cake.ingredients[0].ingredient_id);
    assert_eq!(cake.ingredients[0].quantity, 3.0);

    let carrot = db.find_ingredient_by_name("Carrot").await.unwrap();
    assert_eq!(carrot, Some(soup.ingredients[0].ingredient_id));
}

#[tokio::test]
async fn test_duplicate_recipe_name_is_rejected_without_side_effects() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();

    db.create_recipe_with_ingredients(user.id, &draft("Toast", &["Bread 2 slices"]))
        .await
        .unwrap();
    let err = db
        .create_recipe_with_ingredients(user.id, &draft("Toast", &["Butter 1 knob"]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert!(db.find_ingredient_by_name("Butter").await.unwrap().is_none());
}

#[tokio::test]
async fn test_same_name_allowed_for_different_users() {
    let db = create_test_database().await.unwrap();
    let ben = create_test_user(&db, "ben").await.unwrap();
    let ana = create_test_user(&db, "ana").await.unwrap();

    db.create_recipe_with_ingredients(ben.id, &draft("Toast", &[]))
        .await
        .unwrap();
    db.create_recipe_with_ingredients(ana.id, &draft("Toast", &[]))
        .await
        .unwrap();

    assert_eq!(db.list_recipes(ben.id, false).await.unwrap().len(), 1);
    assert_eq!(db.list_recipes(ana.id, false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reconcile_updates_adds_and_removes_in_order() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    let recipe = db
        .create_recipe_with_ingredients(
            user.id,
            &draft("Pancakes", &["Flour 2 cups", "Milk 1 pint", "Egg 2 units"]),
        )
        .await
        .unwrap();
    let milk_association = recipe.ingredients[1].id;

    let updated = db
        .reconcile_ingredients(
            user.id,
            recipe.id,
            &[
                request("Milk", 2.0, "pints"),
                request("Flour", 2.0, "cups"),
                request("Sugar", 1.0, "tbsp"),
            ],
        )
        .await
        .unwrap();

    let names: Vec<_> = updated.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Flour", "Milk", "Sugar"]);
    let milk = &updated.ingredients[1];
    assert_eq!(milk.id, milk_association);
    assert_eq!(milk.quantity, 2.0);
    assert_eq!(milk.unit, "pints");

    // Removing the association keeps the shared identity
    assert!(db.find_ingredient_by_name("Egg").await.unwrap().is_some());
}

#[tokio::test]
async fn test_reconcile_duplicate_request_keeps_last_quantity() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    let recipe = db
        .create_recipe_with_ingredients(user.id, &draft("Salad", &[]))
        .await
        .unwrap();

    let updated = db
        .reconcile_ingredients(
            user.id,
            recipe.id,
            &[
                request("Tomato", 1.0, "units"),
                request("Lettuce", 1.0, "head"),
                request("Tomato", 4.0, "units"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(updated.ingredients.len(), 2);
    assert_eq!(updated.ingredients[0].name, "Tomato");
    assert_eq!(updated.ingredients[0].quantity, 4.0);
}

#[tokio::test]
async fn test_reconcile_rejects_ingredients_without_instructions() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    let bare = RecipeDraft::new("Bare", "", Vec::new()).unwrap();
    let recipe = db.create_recipe_with_ingredients(user.id, &bare).await.unwrap();

    let err = db
        .reconcile_ingredients(user.id, recipe.id, &[request("Salt", 1.0, "pinch")])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[tokio::test]
async fn test_update_missing_recipe_creates_nothing() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();

    let err = db
        .update_recipe(user.id, 999, &draft("Ghost", &["Ectoplasm 1 jar"]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(db.find_ingredient_by_name("Ectoplasm").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_rename_clash_leaves_recipe_unchanged() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    db.create_recipe_with_ingredients(user.id, &draft("Toast", &[]))
        .await
        .unwrap();
    let porridge = db
        .create_recipe_with_ingredients(user.id, &draft("Porridge", &["Oats 1 cup"]))
        .await
        .unwrap();

    let err = db
        .update_recipe(user.id, porridge.id, &draft("Toast", &["Oats 2 cups"]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    let stored = db.get_recipe(porridge.id, user.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Porridge");
    assert_eq!(stored.ingredients[0].quantity, 1.0);
}

#[tokio::test]
async fn test_list_and_search_recipes() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    db.create_recipe_with_ingredients(user.id, &draft("Tomato soup", &["Tomato 6 units"]))
        .await
        .unwrap();
    db.create_recipe_with_ingredients(user.id, &draft("Apple pie", &[]))
        .await
        .unwrap();
    db.create_recipe_with_ingredients(user.id, &draft("100% rye", &[]))
        .await
        .unwrap();

    let all = db.list_recipes(user.id, false).await.unwrap();
    let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["100% rye", "Apple pie", "Tomato soup"]);

    let with_ingredients = db.list_recipes(user.id, true).await.unwrap();
    assert_eq!(with_ingredients.len(), 1);
    assert_eq!(with_ingredients[0].ingredients.len(), 1);

    let found = db.search_recipes(user.id, "SOUP").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Tomato soup");

    // A literal percent sign does not match everything
    let percent = db.search_recipes(user.id, "%").await.unwrap();
    assert_eq!(percent.len(), 1);

    assert!(db.get_recipe_by_name(user.id, "tomato soup").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_recipe_cascades_to_plans() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    let recipe = db
        .create_recipe_with_ingredients(user.id, &draft("Stew", &["Beef 500 g"]))
        .await
        .unwrap();
    let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    db.plan_day(user.id, day, recipe.id).await.unwrap();

    db.delete_recipe(user.id, recipe.id).await.unwrap();

    assert!(db.get_planned_days(user.id, day, day).await.unwrap().is_empty());
    assert!(db.find_ingredient_by_name("Beef").await.unwrap().is_some());
    let err = db.delete_recipe(user.id, recipe.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_plan_day_replaces_and_summarises() {
    let db = create_test_database().await.unwrap();
    let user = create_test_user(&db, "ben").await.unwrap();
    let stew = db
        .create_recipe_with_ingredients(user.id, &draft("Stew", &[]))
        .await
        .unwrap();
    let curry = db
        .create_recipe_with_ingredients(user.id, &draft("Curry", &[]))
        .await
        .unwrap();
    db.create_recipe_with_ingredients(user.id, &draft("Salad", &[]))
        .await
        .unwrap();

    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
    db.plan_day(user.id, monday, stew.id).await.unwrap();
    db.plan_day(user.id, monday, curry.id).await.unwrap();
    db.plan_day(user.id, tuesday, curry.id).await.unwrap();

    let days = db.get_planned_days(user.id, monday, tuesday).await.unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].recipe.name, "Curry");

    let summary = db.summarise_plans(user.id).await.unwrap();
    let rows: Vec<_> = summary
        .iter()
        .map(|s| (s.name.as_str(), s.count, s.last_eaten))
        .collect();
    assert_eq!(
        rows,
        [
            ("Curry", 2, Some(tuesday)),
            ("Salad", 0, None),
            ("Stew", 0, None),
        ]
    );
}

#[tokio::test]
async fn test_plan_day_rejects_other_users_recipe() {
    let db = create_test_database().await.unwrap();
    let ben = create_test_user(&db, "ben").await.unwrap();
    let ana = create_test_user(&db, "ana").await.unwrap();
    let stew = db
        .create_recipe_with_ingredients(ben.id, &draft("Stew", &[]))
        .await
        .unwrap();

    let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    let err = db.plan_day(ana.id, day, stew.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
