//! Data-driven schema migrator.
//!
//! A migration is data: a name plus an ordered list of schema-change
//! descriptors, not a compiled migration class. The migrator applies the
//! pending subset in ascending name order, one transaction per migration,
//! and records each application in the `schema_migrations` table.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::sea_query::{
    ColumnDef, IndexCreateStatement, Table, TableAlterStatement, TableCreateStatement,
};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryOrder,
    Set, Statement, TransactionTrait,
};

use crate::errors::{AppError, AppResult};

use super::record;

/// A single schema change.
#[derive(Debug, Clone)]
pub enum SchemaStep {
    CreateTable(TableCreateStatement),
    AlterTable(TableAlterStatement),
    CreateIndex(IndexCreateStatement),
}

impl SchemaStep {
    fn build(&self, backend: DbBackend) -> Statement {
        match self {
            SchemaStep::CreateTable(stmt) => backend.build(stmt),
            SchemaStep::AlterTable(stmt) => backend.build(stmt),
            SchemaStep::CreateIndex(stmt) => backend.build(stmt),
        }
    }
}

/// A named, versioned schema change.
///
/// Names carry a timestamp-like prefix (`m{YYYYMMDD}_{HHMMSS}_{description}`)
/// so lexicographic order is application order.
#[derive(Debug, Clone)]
pub struct Migration {
    pub name: &'static str,
    pub steps: Vec<SchemaStep>,
}

/// Applies an ordered migration catalog to the store.
pub struct Migrator {
    migrations: Vec<Migration>,
}

impl Migrator {
    /// Build a migrator over a catalog, rejecting catalogs whose names are
    /// not strictly increasing (which includes duplicates).
    pub fn new(migrations: Vec<Migration>) -> AppResult<Self> {
        for pair in migrations.windows(2) {
            if pair[0].name >= pair[1].name {
                return Err(AppError::migration(format!(
                    "catalog out of order: {:?} must precede {:?}",
                    pair[1].name, pair[0].name
                )));
            }
        }

        Ok(Self { migrations })
    }

    /// Apply every pending migration in ascending name order.
    ///
    /// Each migration's steps and its record row are committed as one
    /// transaction; on failure the transaction rolls back, later
    /// migrations are not attempted, and the error is fatal to startup.
    /// Returns the number of migrations applied; a second run over the
    /// same catalog applies none.
    pub async fn apply(&self, conn: &DatabaseConnection) -> AppResult<usize> {
        self.ensure_record_table(conn).await?;
        let applied = self.applied_names(conn).await?;

        let known: HashSet<&str> = self.migrations.iter().map(|m| m.name).collect();
        for name in &applied {
            if !known.contains(name.as_str()) {
                // Tolerated: the store may have been migrated by a newer build.
                tracing::warn!("Store records unknown migration {}", name);
            }
        }

        let backend = conn.get_database_backend();
        let mut count = 0;

        for migration in &self.migrations {
            if applied.contains(migration.name) {
                continue;
            }

            tracing::info!("Applying migration {}", migration.name);

            let txn = conn
                .begin()
                .await
                .map_err(|e| AppError::migration(format!("{}: {}", migration.name, e)))?;

            for step in &migration.steps {
                txn.execute(step.build(backend)).await.map_err(|e| {
                    AppError::migration(format!("{}: {}", migration.name, e))
                })?;
            }

            record::ActiveModel {
                name: Set(migration.name.to_string()),
                applied_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await
            .map_err(|e| AppError::migration(format!("{}: {}", migration.name, e)))?;

            txn.commit()
                .await
                .map_err(|e| AppError::migration(format!("{}: {}", migration.name, e)))?;

            count += 1;
        }

        if count > 0 {
            tracing::info!("Applied {} migration(s)", count);
        } else {
            tracing::debug!("Schema already up to date");
        }

        Ok(count)
    }

    /// Every known migration with its applied flag, in catalog order.
    pub async fn status(&self, conn: &DatabaseConnection) -> AppResult<Vec<(String, bool)>> {
        self.ensure_record_table(conn).await?;
        let applied = self.applied_names(conn).await?;

        Ok(self
            .migrations
            .iter()
            .map(|m| (m.name.to_string(), applied.contains(m.name)))
            .collect())
    }

    async fn ensure_record_table(&self, conn: &DatabaseConnection) -> AppResult<()> {
        conn.execute(conn.get_database_backend().build(&record_table_statement()))
            .await?;
        Ok(())
    }

    async fn applied_names(&self, conn: &DatabaseConnection) -> AppResult<HashSet<String>> {
        let rows = record::Entity::find()
            .order_by_asc(record::Column::Name)
            .all(conn)
            .await?;

        Ok(rows.into_iter().map(|r| r.name).collect())
    }
}

/// The record table's `applied_at` must be a timezone-aware column so it
/// round-trips the entity's `DateTimeUtc` on every backend.
fn record_table_statement() -> TableCreateStatement {
    Table::create()
        .table(record::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(record::Column::Name)
                .string()
                .not_null()
                .primary_key(),
        )
        .col(
            ColumnDef::new(record::Column::AppliedAt)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .to_owned()
}

#[cfg(test)]
mod tests {
    use sea_orm::sea_query::Index;
    use sea_orm::DeriveIden;

    use crate::config::Config;
    use crate::infra::db::Database;

    use super::*;

    #[derive(DeriveIden)]
    enum Widgets {
        Table,
        Id,
        Label,
    }

    fn create_widgets() -> Migration {
        Migration {
            name: "m20240101_000001_create_widgets_table",
            steps: vec![SchemaStep::CreateTable(
                Table::create()
                    .table(Widgets::Table)
                    .col(
                        ColumnDef::new(Widgets::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Widgets::Label).string().not_null())
                    .to_owned(),
            )],
        }
    }

    fn index_widgets() -> Migration {
        Migration {
            name: "m20240102_000001_add_widgets_label_index",
            steps: vec![SchemaStep::CreateIndex(
                Index::create()
                    .name("idx_widgets_label")
                    .table(Widgets::Table)
                    .col(Widgets::Label)
                    .to_owned(),
            )],
        }
    }

    /// Index on a table no migration ever creates.
    fn broken_migration() -> Migration {
        #[derive(DeriveIden)]
        enum Missing {
            Table,
            Field,
        }

        Migration {
            name: "m20240101_120000_index_missing_table",
            steps: vec![SchemaStep::CreateIndex(
                Index::create()
                    .name("idx_missing_field")
                    .table(Missing::Table)
                    .col(Missing::Field)
                    .to_owned(),
            )],
        }
    }

    async fn memory_store() -> Database {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            log_level: "info".to_string(),
        };
        Database::connect(&config).await.unwrap()
    }

    #[test]
    fn record_table_is_timezone_aware_on_postgres() {
        let sql = DbBackend::Postgres
            .build(&record_table_statement())
            .to_string();
        assert!(sql.contains("timestamptz"), "statement was: {}", sql);
    }

    #[test]
    fn rejects_out_of_order_catalog() {
        let result = Migrator::new(vec![index_widgets(), create_widgets()]);
        assert!(matches!(result, Err(AppError::Migration(_))));
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Migrator::new(vec![create_widgets(), create_widgets()]);
        assert!(matches!(result, Err(AppError::Migration(_))));
    }

    #[tokio::test]
    async fn applies_pending_migrations_in_order() {
        let db = memory_store().await;
        let migrator = Migrator::new(vec![create_widgets(), index_widgets()]).unwrap();

        let applied = migrator.apply(db.connection()).await.unwrap();
        assert_eq!(applied, 2);

        let status = migrator.status(db.connection()).await.unwrap();
        assert_eq!(
            status,
            vec![
                ("m20240101_000001_create_widgets_table".to_string(), true),
                ("m20240102_000001_add_widgets_label_index".to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn second_apply_is_a_no_op() {
        let db = memory_store().await;
        let migrator = Migrator::new(vec![create_widgets(), index_widgets()]).unwrap();

        assert_eq!(migrator.apply(db.connection()).await.unwrap(), 2);
        assert_eq!(migrator.apply(db.connection()).await.unwrap(), 0);

        let records = record::Entity::find()
            .all(db.connection())
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn failing_migration_stops_the_run_and_records_nothing() {
        let db = memory_store().await;
        let migrator = Migrator::new(vec![
            create_widgets(),
            broken_migration(),
            index_widgets(),
        ])
        .unwrap();

        let err = migrator.apply(db.connection()).await.unwrap_err();
        assert!(matches!(err, AppError::Migration(_)));

        // Only the migration before the failure is recorded; the one after
        // it was never attempted.
        let status = migrator.status(db.connection()).await.unwrap();
        assert_eq!(
            status,
            vec![
                ("m20240101_000001_create_widgets_table".to_string(), true),
                ("m20240101_120000_index_missing_table".to_string(), false),
                ("m20240102_000001_add_widgets_label_index".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_applied_records_are_tolerated() {
        let db = memory_store().await;
        let full = Migrator::new(vec![create_widgets(), index_widgets()]).unwrap();
        full.apply(db.connection()).await.unwrap();

        // A migrator from an older build that only knows the first entry
        // still reports its own catalog cleanly.
        let older = Migrator::new(vec![create_widgets()]).unwrap();
        assert_eq!(older.apply(db.connection()).await.unwrap(), 0);

        let status = older.status(db.connection()).await.unwrap();
        assert_eq!(
            status,
            vec![("m20240101_000001_create_widgets_table".to_string(), true)]
        );
    }
}
