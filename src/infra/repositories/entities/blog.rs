//! Blog database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Blog;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Blog {
    fn from(model: Model) -> Self {
        Blog {
            id: model.id,
            url: model.url,
        }
    }
}
