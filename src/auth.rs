// ABOUTME: Basic authentication for the JSON API and HTML pages
// ABOUTME: Resolves the Authorization header to a registered user by name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Authentication
//!
//! The server trusts the basic auth user name and ignores the password.
//! This is a placeholder scheme for a single household, not a security
//! boundary. A missing header or an unknown user yields `AUTH_REQUIRED` or
//! `AUTH_INVALID`; [`challenge_unauthorized`] then adds the
//! `WWW-Authenticate` header so browsers prompt for credentials.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::{Authorization, HeaderMapExt};

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;

/// Realm announced in the basic auth challenge
pub const AUTH_REALM: &str = "meals";

/// Resolve the basic auth user of a request
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the header is missing or not basic auth,
/// `AUTH_INVALID` when no user has that name, or a database error
pub async fn authenticate(headers: &HeaderMap, database: &Database) -> AppResult<User> {
    let Some(Authorization(credentials)) = headers.typed_get::<Authorization<Basic>>() else {
        return Err(AppError::auth_required());
    };

    let user_name = credentials.username();
    match database.get_user_by_name(user_name).await? {
        Some(user) => {
            AppLogger::log_auth_event(user_name, "basic", true, None);
            Ok(user)
        }
        None => {
            AppLogger::log_auth_event(user_name, "basic", false, Some("unknown user"));
            Err(AppError::auth_invalid("Incorrect username or password"))
        }
    }
}

/// Add a basic auth challenge to every 401 response
pub async fn challenge_unauthorized(mut response: Response) -> Response {
    if response.status() == StatusCode::UNAUTHORIZED {
        let challenge = format!("Basic realm=\"{AUTH_REALM}\"");
        if let Ok(value) = HeaderValue::from_str(&challenge) {
            response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
        }
    }
    response
}
