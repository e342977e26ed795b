// ABOUTME: Meals server binary serving the JSON API and the HTMX front end
// ABOUTME: Loads configuration from the environment with command line overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

//! # Meals Server Binary
//!
//! ```bash
//! meals-server --port 8000 --database-url sqlite:./data/meals.db
//! ```

use anyhow::Result;
use clap::Parser;
use meals::{config::database::DatabaseUrl, config::environment::ServerConfig, logging, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "meals-server")]
#[command(about = "Recipe and meal planning server")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url {
        config.database = DatabaseUrl::parse_url(&url)?;
    }

    info!("Starting meals server: {}", config.summary());
    server::serve(config).await
}
