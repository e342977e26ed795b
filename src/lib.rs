// ABOUTME: Main library entry point for the meals recipe and planning server
// ABOUTME: Provides the ingredient core, SQLite store, JSON API and HTMX front end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

#![deny(unsafe_code)]

//! # Meals
//!
//! A personal recipe and meal-planning server. Users store recipes, plan which
//! recipe to cook on which day and keep a cooking timing schedule.
//!
//! ## Architecture
//!
//! - **Ingredients**: the free-text ingredient parser and the ingredient list reconciler
//! - **Database**: `SQLite` storage for users, recipes, shared ingredients, timings and plans
//! - **Routes**: JSON API under `/api/v1`
//! - **Web**: server-rendered HTML fragments driven by HTMX
//! - **Auth**: placeholder basic auth that identifies a user by name
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use meals::config::environment::ServerConfig;
//! use meals::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Meals server configured with port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Basic authentication
pub mod auth;

/// Environment driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// `SQLite` storage layer
pub mod database;

/// Unified error handling (re-exported from `meals-core`)
pub mod errors;

/// Ingredient parsing and reconciliation
pub mod ingredients;

/// Structured logging setup
pub mod logging;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Domain models and API payloads
pub mod models;

/// Shared state handed to every route
pub mod resources;

/// JSON API routes
pub mod routes;

/// Router assembly and HTTP server
pub mod server;

/// Server-rendered HTML front end
pub mod web;
