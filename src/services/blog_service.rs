//! Blog service - Handles blog-entry business logic.
//!
//! Orchestrates the repository and translates absence into a typed
//! not-found error for the API layer.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::Blog;
use crate::errors::{AppResult, OptionExt};
use crate::infra::BlogRepository;
use crate::types::{Paginated, PaginationParams};

/// Blog service trait for dependency injection.
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Create a new blog entry from a url
    async fn create_blog(&self, url: String) -> AppResult<Blog>;

    /// Get a blog entry by id, failing with not-found if absent
    async fn get_blog(&self, id: i32) -> AppResult<Blog>;

    /// List every blog entry
    async fn list_blogs(&self) -> AppResult<Vec<Blog>>;

    /// List one page of blog entries with pagination metadata
    async fn list_blogs_page(&self, params: PaginationParams) -> AppResult<Paginated<Blog>>;
}

/// Concrete implementation of BlogService over a repository.
pub struct BlogManager {
    repo: Arc<dyn BlogRepository>,
}

impl BlogManager {
    /// Create new service instance
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl BlogService for BlogManager {
    async fn create_blog(&self, url: String) -> AppResult<Blog> {
        self.repo.create(url).await
    }

    async fn get_blog(&self, id: i32) -> AppResult<Blog> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_blogs(&self) -> AppResult<Vec<Blog>> {
        self.repo.list().await
    }

    async fn list_blogs_page(&self, params: PaginationParams) -> AppResult<Paginated<Blog>> {
        let (data, total) = self.repo.list_page(&params).await?;
        Ok(Paginated::new(data, params.page, params.limit(), total))
    }
}
