// ABOUTME: CORS middleware configuration for the JSON API and HTMX pages
// ABOUTME: Provides Cross-Origin Resource Sharing setup for browser clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use axum::http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::ServerConfig;

/// Headers sent by HTMX requests
const HTMX_HEADERS: [&str; 5] = [
    "hx-request",
    "hx-target",
    "hx-trigger",
    "hx-current-url",
    "hx-trigger-name",
];

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// An empty list or `*` allows any origin. Otherwise each entry that is a
/// valid header value is allowed; if none are valid the layer falls back to
/// any origin.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://meals.example.com,http://localhost:8000"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let origins = &config.cors_allowed_origins;
    let allow_origin = if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        if parsed.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(parsed)
        }
    };

    let mut allow_headers = vec![
        HeaderName::from_static("content-type"),
        HeaderName::from_static("authorization"),
        HeaderName::from_static("accept"),
        HeaderName::from_static("origin"),
        HeaderName::from_static("x-request-id"),
    ];
    allow_headers.extend(HTMX_HEADERS.iter().map(|name| HeaderName::from_static(name)));

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers(allow_headers)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}
