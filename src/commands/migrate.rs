//! Migrate command - schema management from the CLI.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Run the requested migration action against the configured database.
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect_unmigrated(&config)
        .await
        .map_err(|e| AppError::internal(format!("database connection failed: {e}")))?;

    match args.action {
        MigrateAction::Up => {
            db.migrate_up().await.map_err(db_error)?;
            tracing::info!("pending migrations applied");
        }
        MigrateAction::Down => {
            db.migrate_down().await.map_err(db_error)?;
            tracing::info!("last migration rolled back");
        }
        MigrateAction::Fresh => {
            tracing::warn!("dropping all tables before re-migrating");
            db.migrate_fresh().await.map_err(db_error)?;
            tracing::info!("schema rebuilt from scratch");
        }
        MigrateAction::Status => {
            for (name, applied) in db.migration_status().await.map_err(db_error)? {
                println!("{} {}", if applied { "[x]" } else { "[ ]" }, name);
            }
        }
    }

    Ok(())
}

fn db_error(e: sea_orm::DbErr) -> AppError {
    AppError::internal(e.to_string())
}
