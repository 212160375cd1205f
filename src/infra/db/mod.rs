//! Database connection and schema management.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, Statement,
};

use crate::config::{Config, MAX_DB_CONNECTIONS};
use crate::errors::AppResult;

pub mod migrations;
pub mod migrator;
mod record;

pub use migrations::catalog;
pub use migrator::{Migration, Migrator, SchemaStep};

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect to the store eagerly and verify the connection with a ping.
    ///
    /// Connecting does not run migrations; the bootstrap chain applies
    /// them explicitly after this succeeds.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(&config.database_url);
        options.max_connections(MAX_DB_CONNECTIONS);

        // An in-memory sqlite database lives inside a single connection;
        // a wider pool would hand out empty databases.
        if config.database_url.starts_with("sqlite::memory:") {
            options.max_connections(1).min_connections(1);
        }

        let connection = SeaDatabase::connect(options).await?;
        let db = Self { connection };
        db.ping().await?;

        Ok(db)
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> AppResult<()> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}
