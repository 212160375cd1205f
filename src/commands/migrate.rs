//! Migrate command - Database migration management.

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{catalog, Database, Migrator};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let migrator = Migrator::new(catalog())?;

    match args.action {
        MigrateAction::Up => {
            tracing::info!("Applying pending migrations...");
            let applied = migrator.apply(db.connection()).await?;
            tracing::info!("Applied {} migration(s)", applied);
        }
        MigrateAction::Status => {
            let status = migrator.status(db.connection()).await?;
            for (name, applied) in status {
                let status_str = if applied { "applied" } else { "pending" };
                println!("{}: {}", name, status_str);
            }
        }
    }

    Ok(())
}
