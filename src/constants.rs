// ABOUTME: Application-wide constants and environment-derived defaults
// ABOUTME: Contains ports, API paths, page routes and timing defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Constants Module
//!
//! Hardcoded constants plus small helpers that read environment variables
//! with a fallback default.

use std::env;

/// Server identity
pub mod service {
    /// Service name used in logs
    pub const SERVICE_NAME: &str = "meals";

    /// Server version from Cargo.toml
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Default values used when the environment does not override them
pub mod defaults {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;

    /// Default database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/meals.db";

    /// Default allowed CORS origins
    pub const DEFAULT_CORS_ORIGINS: &str = "*";

    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Maximum accepted request body in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

    /// Default base URL used by the command line client
    pub const DEFAULT_CLIENT_BASE_URL: &str = "http://127.0.0.1:8000";
}

/// JSON API paths
pub mod api {
    /// Prefix of every versioned API route
    pub const API_V1_PREFIX: &str = "/api/v1";
}

/// Timing schedule defaults shown before the user saved anything
pub mod timings {
    /// Default finish hour (24h clock)
    pub const DEFAULT_FINISH_HOUR: u32 = 18;

    /// Description of the single default step
    pub const DEFAULT_STEP_DESCRIPTION: &str = "Finish";
}

/// Planner defaults
pub mod planner {
    /// Number of days shown on the weekly plan page
    pub const DAYS_IN_PLAN: u64 = 7;
}

/// Environment-based configuration
pub mod env_config {
    use super::{defaults, env};

    /// Get bind host from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| defaults::DEFAULT_HOST.into())
    }

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(defaults::DEFAULT_HTTP_PORT)
    }

    /// Get database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| defaults::DEFAULT_DATABASE_URL.into())
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    }

    /// Get comma separated CORS origins from environment or default
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| defaults::DEFAULT_CORS_ORIGINS.into())
    }

    /// Get request timeout in seconds from environment or default
    #[must_use]
    pub fn request_timeout_secs() -> u64 {
        env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .unwrap_or(defaults::DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Get deployment environment name from environment or default
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }
}
