// ABOUTME: Meals CLI - command line client for a running meals server
// ABOUTME: Bulk loads recipes from YAML and plans meals through the JSON API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors
//!
//! Usage:
//! ```bash
//! # Load every recipe in a YAML file
//! meals-cli --user ben populate recipes.yaml
//!
//! # Plan a recipe for a day
//! meals-cli --user ben plan "Carrot soup" 2026-10-19
//! ```

mod client;
mod commands;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use client::MealsClient;
use meals::constants::defaults::DEFAULT_CLIENT_BASE_URL;

#[derive(Parser)]
#[command(
    name = "meals-cli",
    about = "Meals command line client",
    long_about = "Command-line client that loads recipes and plans meals on a running meals server."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Server base URL
    #[arg(long, global = true, env = "MEALS_BASE_URL", default_value = DEFAULT_CLIENT_BASE_URL)]
    base_url: String,

    /// Basic auth user name
    #[arg(long, global = true, env = "MEALS_USER")]
    user: String,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create every recipe listed in a YAML file
    Populate {
        /// YAML file with a list of `name`, `ingredients` and `instructions`
        file: PathBuf,
    },

    /// Plan a recipe, looked up by exact name, for a day
    Plan {
        /// Recipe name
        name: String,

        /// Day in `YYYY-MM-DD` form
        day: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();
    debug!(base_url = %cli.base_url, user = %cli.user, "Meals CLI");

    let client = MealsClient::new(&cli.base_url, &cli.user)?;
    match cli.command {
        Command::Populate { file } => commands::populate(&client, &file).await,
        Command::Plan { name, day } => commands::plan(&client, &name, day).await,
    }
}
