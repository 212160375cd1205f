//! Blog repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::entities::blog::{self, ActiveModel, Entity as BlogEntity};
use crate::domain::{validate_url, Blog};
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

/// Blog repository trait for dependency injection.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new entry; the store assigns the id.
    ///
    /// The url is validated before anything touches the store, so an
    /// invalid url persists no row.
    async fn create(&self, url: String) -> AppResult<Blog>;

    /// Find an entry by its id.
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Blog>>;

    /// List every entry, ordered by id. Re-querying reflects current state.
    async fn list(&self) -> AppResult<Vec<Blog>>;

    /// List one page of entries plus the total count.
    ///
    /// Each call re-queries through the store's paginator, so a restarted
    /// listing sees a fresh view.
    async fn list_page(&self, params: &PaginationParams) -> AppResult<(Vec<Blog>, u64)>;
}

/// Concrete implementation of BlogRepository over SeaORM
pub struct BlogStore {
    db: DatabaseConnection,
}

impl BlogStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlogRepository for BlogStore {
    async fn create(&self, url: String) -> AppResult<Blog> {
        validate_url(&url)?;

        let active_model = ActiveModel {
            url: Set(url),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Blog::from(model))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Blog>> {
        let result = BlogEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Blog::from))
    }

    async fn list(&self) -> AppResult<Vec<Blog>> {
        let models = BlogEntity::find()
            .order_by_asc(blog::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Blog::from).collect())
    }

    async fn list_page(&self, params: &PaginationParams) -> AppResult<(Vec<Blog>, u64)> {
        let paginator = BlogEntity::find()
            .order_by_asc(blog::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Blog::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::infra::db::{catalog, Database, Migrator};

    use super::*;

    async fn store() -> BlogStore {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            log_level: "info".to_string(),
        };
        let db = Database::connect(&config).await.unwrap();
        Migrator::new(catalog())
            .unwrap()
            .apply(db.connection())
            .await
            .unwrap();
        BlogStore::new(db.get_connection())
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let store = store().await;

        let first = store.create("http://example.com/a".to_string()).await.unwrap();
        let second = store.create("http://example.com/b".to_string()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn created_entry_is_found_by_id() {
        let store = store().await;

        let created = store.create("http://example.com".to_string()).await.unwrap();
        let found = store.find_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(found.url, "http://example.com");
    }

    #[tokio::test]
    async fn invalid_url_persists_nothing() {
        let store = store().await;

        assert!(matches!(
            store.create(String::new()).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            store.create("a".repeat(101)).await,
            Err(AppError::Validation(_))
        ));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn absent_id_finds_nothing() {
        let store = store().await;
        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_reflects_current_state() {
        let store = store().await;

        assert!(store.list().await.unwrap().is_empty());

        store.create("http://example.com".to_string()).await.unwrap();
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, "http://example.com");
    }

    #[tokio::test]
    async fn list_page_reports_total_across_pages() {
        let store = store().await;
        for i in 0..5 {
            store
                .create(format!("http://example.com/{}", i))
                .await
                .unwrap();
        }

        let params = PaginationParams {
            page: 2,
            per_page: 2,
        };
        let (page, total) = store.list_page(&params).await.unwrap();

        assert_eq!(total, 5);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].url, "http://example.com/2");
    }
}
