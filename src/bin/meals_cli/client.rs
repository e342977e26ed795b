// ABOUTME: HTTP client for the meals JSON API used by meals-cli
// ABOUTME: Wraps reqwest with the base URL and basic auth user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;

use meals::constants::api::API_V1_PREFIX;
use meals::models::{CreateRecipeRequest, PlannedDay, PlannedDayRequest, Recipe};

/// Outcome of creating one recipe
pub enum CreateOutcome {
    /// Stored by the server
    Created(Recipe),
    /// Skipped because the name is taken
    AlreadyExists,
}

/// Authenticated client for one user
pub struct MealsClient {
    http: Client,
    api_base: String,
    user: String,
}

impl MealsClient {
    /// Build a client for `base_url`, e.g. `http://127.0.0.1:8000`
    pub fn new(base_url: &str, user: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            api_base: format!("{}{API_V1_PREFIX}", base_url.trim_end_matches('/')),
            user: user.to_owned(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{path}", self.api_base))
            .basic_auth(&self.user, None::<&str>)
    }

    fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RequestBuilder {
        self.http
            .post(format!("{}{path}", self.api_base))
            .basic_auth(&self.user, None::<&str>)
            .json(body)
    }

    /// Create a recipe, treating a name conflict as a skip
    pub async fn create_recipe(&self, recipe: &CreateRecipeRequest) -> Result<CreateOutcome> {
        let response = self.post_json("/recipes", recipe).send().await?;
        if response.status() == StatusCode::CONFLICT {
            return Ok(CreateOutcome::AlreadyExists);
        }
        let response = error_for_status(response).await?;
        Ok(CreateOutcome::Created(response.json().await?))
    }

    /// Look up a recipe by exact name
    pub async fn recipe_by_name(&self, name: &str) -> Result<Recipe> {
        let response = self
            .get("/recipes/search")
            .query(&[("name", name)])
            .send()
            .await?;
        Ok(error_for_status(response).await?.json().await?)
    }

    /// Plan a recipe for a day
    pub async fn plan_day(&self, request: &PlannedDayRequest) -> Result<PlannedDay> {
        let response = self.post_json("/planned_day", request).send().await?;
        Ok(error_for_status(response).await?.json().await?)
    }
}

/// Turn a non-2xx response into an error carrying the server's message
async fn error_for_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("Server answered {status}: {body}")
}
