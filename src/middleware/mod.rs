// ABOUTME: HTTP middleware for CORS, request tracing, timeouts and body limits
// ABOUTME: Provides request ID generation and spans for structured request logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and context management
pub use tracing::{apply_request_layers, create_request_span, REQUEST_ID_HEADER};
