// ABOUTME: Configuration module declarations for the meals server
// ABOUTME: Groups environment parsing and database URL handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! Configuration management
//!
//! All configuration comes from environment variables (optionally loaded from
//! a `.env` file). There is no configuration file.

/// Database URL parsing
pub mod database;

/// Environment variable driven server configuration
pub mod environment;
