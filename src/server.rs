// ABOUTME: Router assembly and HTTP server lifecycle for the meals server
// ABOUTME: Merges API and web routes, applies middleware and shuts down on signals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Meals Contributors

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{middleware::map_response, Router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::auth::challenge_unauthorized;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::{apply_request_layers, setup_cors};
use crate::resources::ServerResources;
use crate::routes::api_routes;
use crate::web::web_routes;

/// Build the complete application router
///
/// Used by [`serve`] and by integration tests that drive the router with
/// `tower::ServiceExt::oneshot`.
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let router = Router::new()
        .merge(api_routes(resources))
        .merge(web_routes(resources))
        .layer(map_response(challenge_unauthorized))
        .layer(setup_cors(&resources.config));

    apply_request_layers(router, resources.config.request_timeout())
}

/// Connect the database and serve until Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the listener cannot bind
pub async fn serve(config: ServerConfig) -> Result<()> {
    let database = Database::new(&config.database)
        .await
        .context("Failed to open database")?;
    let address = config.bind_address();
    let resources = Arc::new(ServerResources::new(database, config));
    let app = build_router(&resources);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Meals server listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Meals server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
