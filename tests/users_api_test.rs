// ABOUTME: Integration tests for user registration and basic authentication
// ABOUTME: Drives the full router in-process with an in-memory database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;
mod helpers;

use common::{create_test_app, create_test_server_resources};
use helpers::axum_test::AxumTestRequest;
use meals::models::User;
use meals::server::build_router;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_needs_no_credentials() {
    let resources = create_test_server_resources().await.unwrap();
    let response = AxumTestRequest::get("/health")
        .send(build_router(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert!(response.header("x-request-id").is_some());
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_then_fetch_current_user() {
    let resources = create_test_server_resources().await.unwrap();
    let app = build_router(&resources);

    let created = AxumTestRequest::post("/api/v1/users")
        .json(&json!({"user_name": "ben"}))
        .send(app.clone())
        .await;
    assert_eq!(created.status(), 201);
    let user: User = created.json();
    assert_eq!(user.user_name, "ben");

    let me = AxumTestRequest::get("/api/v1/users/me")
        .basic_auth("ben")
        .send(app)
        .await;
    assert_eq!(me.status(), 200);
    assert_eq!(me.json::<User>(), user);
}

#[tokio::test]
async fn test_register_duplicate_user_conflicts() {
    let (app, _resources) = create_test_app("ben").await.unwrap();

    let response = AxumTestRequest::post("/api/v1/users")
        .json(&json!({"user_name": "ben"}))
        .send(app)
        .await;

    assert_eq!(response.status(), 409);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_missing_credentials_get_basic_challenge() {
    let (app, _resources) = create_test_app("ben").await.unwrap();

    let response = AxumTestRequest::get("/api/v1/recipes").send(app).await;

    assert_eq!(response.status(), 401);
    assert_eq!(
        response.header("www-authenticate"),
        Some("Basic realm=\"meals\"")
    );
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let (app, _resources) = create_test_app("ben").await.unwrap();

    let response = AxumTestRequest::get("/api/v1/users/me")
        .basic_auth("mallory")
        .send(app)
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "AUTH_INVALID");
    assert_eq!(body["error"]["message"], "Incorrect username or password");
}
