//! Blog service unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;

use blogstore::domain::Blog;
use blogstore::errors::{AppError, AppResult};
use blogstore::infra::BlogRepository;
use blogstore::services::{BlogManager, BlogService};
use blogstore::types::{Paginated, PaginationParams};

mock! {
    BlogRepo {}

    #[async_trait]
    impl BlogRepository for BlogRepo {
        async fn create(&self, url: String) -> AppResult<Blog>;
        async fn find_by_id(&self, id: i32) -> AppResult<Option<Blog>>;
        async fn list(&self) -> AppResult<Vec<Blog>>;
        async fn list_page(&self, params: &PaginationParams) -> AppResult<(Vec<Blog>, u64)>;
    }
}

fn entry(id: i32, url: &str) -> Blog {
    Blog {
        id,
        url: url.to_string(),
    }
}

#[tokio::test]
async fn get_blog_returns_found_entry() {
    let mut repo = MockBlogRepo::new();
    repo.expect_find_by_id()
        .with(eq(7))
        .returning(|id| Ok(Some(entry(id, "http://example.com"))));

    let service = BlogManager::new(Arc::new(repo));
    let blog = service.get_blog(7).await.unwrap();

    assert_eq!(blog.id, 7);
    assert_eq!(blog.url, "http://example.com");
}

#[tokio::test]
async fn get_blog_translates_absence_to_not_found() {
    let mut repo = MockBlogRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let service = BlogManager::new(Arc::new(repo));
    let err = service.get_blog(99).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn create_blog_passes_url_through() {
    let mut repo = MockBlogRepo::new();
    repo.expect_create()
        .with(eq("http://example.com".to_string()))
        .returning(|url| Ok(entry(1, &url)));

    let service = BlogManager::new(Arc::new(repo));
    let blog = service
        .create_blog("http://example.com".to_string())
        .await
        .unwrap();

    assert_eq!(blog.id, 1);
}

#[tokio::test]
async fn create_blog_propagates_validation_errors() {
    let mut repo = MockBlogRepo::new();
    repo.expect_create()
        .returning(|_| Err(AppError::validation("url must not be empty")));

    let service = BlogManager::new(Arc::new(repo));
    let err = service.create_blog(String::new()).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn list_blogs_returns_every_entry() {
    let mut repo = MockBlogRepo::new();
    repo.expect_list()
        .returning(|| Ok(vec![entry(1, "http://a"), entry(2, "http://b")]));

    let service = BlogManager::new(Arc::new(repo));
    let blogs = service.list_blogs().await.unwrap();

    assert_eq!(blogs.len(), 2);
    assert_eq!(blogs[0].id, 1);
}

#[tokio::test]
async fn list_blogs_page_wraps_results_with_metadata() {
    let mut repo = MockBlogRepo::new();
    repo.expect_list_page()
        .returning(|_| Ok((vec![entry(3, "http://c"), entry(4, "http://d")], 5)));

    let service = BlogManager::new(Arc::new(repo));
    let params = PaginationParams {
        page: 2,
        per_page: 2,
    };
    let Paginated { data, meta } = service.list_blogs_page(params).await.unwrap();

    assert_eq!(data.len(), 2);
    assert_eq!(meta.page, 2);
    assert_eq!(meta.per_page, 2);
    assert_eq!(meta.total, 5);
    assert_eq!(meta.total_pages, 3);
}
