//! Serve command - runs the HTTP API.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Connect, migrate, and serve until shutdown.
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    let database = Database::connect(&config)
        .await
        .map_err(|e| AppError::internal(format!("database connection failed: {e}")))?;

    let state = AppState::from_config(Arc::new(database), config);
    let app = create_router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("cannot bind {addr}: {e}")))?;

    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("server error: {e}")))
}
