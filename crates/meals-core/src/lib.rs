// ABOUTME: Core error types for the meals recipe and planning server
// ABOUTME: Foundation crate shared by the server library and its binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

#![deny(unsafe_code)]

//! # Meals Core
//!
//! Foundation crate providing the error model of the meals server. It is
//! designed to change infrequently so the main crate compiles incrementally.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, `ErrorResponse` and the domain `RecipeError`

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;
