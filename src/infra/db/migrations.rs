//! The application's migration catalog.
//!
//! Migration names follow the pattern `m{YYYYMMDD}_{HHMMSS}_{description}`;
//! lexicographic order is application order.

use sea_orm::sea_query::{ColumnDef, Index, Table};
use sea_orm::DeriveIden;

use crate::config::MAX_URL_LENGTH;

use super::{Migration, SchemaStep};

#[derive(DeriveIden)]
enum Blogs {
    Table,
    Id,
    Url,
}

/// Every schema change the service knows about, oldest first.
pub fn catalog() -> Vec<Migration> {
    vec![
        Migration {
            name: "m20160406_103916_create_blogs_table",
            steps: vec![SchemaStep::CreateTable(
                Table::create()
                    .table(Blogs::Table)
                    .col(
                        ColumnDef::new(Blogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Blogs::Url)
                            .string_len(MAX_URL_LENGTH as u32)
                            .not_null(),
                    )
                    .to_owned(),
            )],
        },
        Migration {
            name: "m20160406_212008_add_blogs_url_index",
            steps: vec![SchemaStep::CreateIndex(
                Index::create()
                    .name("idx_blogs_url")
                    .table(Blogs::Table)
                    .col(Blogs::Url)
                    .to_owned(),
            )],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::super::Migrator;
    use super::*;

    #[test]
    fn catalog_is_strictly_ordered() {
        assert!(Migrator::new(catalog()).is_ok());
    }
}
