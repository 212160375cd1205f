//! Blog entry handlers behind the MVC-style default route.
//!
//! The default template `{controller=Home}/{action=Index}/{id?}` binds a
//! controller and action; this module maps those bound values to the blog
//! operations. Controller and action names compare case-insensitively.

use std::sync::Arc;

use axum::{
    extract::Query,
    http::Method,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::payload::ValidatedJson;
use crate::errors::{AppError, AppResult};
use crate::routing::RequestContext;
use crate::services::BlogService;
use crate::types::{ApiResponse, Created, PaginationParams};

/// Blog entry creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlogRequest {
    /// Entry url (1 to 100 characters)
    #[validate(length(min = 1, max = 100, message = "url must be between 1 and 100 characters"))]
    pub url: String,
}

/// Route a matched default-template request to the blog operations.
pub async fn dispatch_action(
    service: Arc<dyn BlogService>,
    ctx: RequestContext,
) -> AppResult<Response> {
    // Defaults guarantee both values are bound on this template.
    let controller = ctx
        .values
        .get("controller")
        .unwrap_or("Home")
        .to_ascii_lowercase();
    let action = ctx
        .values
        .get("action")
        .unwrap_or("Index")
        .to_ascii_lowercase();

    match (controller.as_str(), action.as_str()) {
        ("home" | "blogs", "index") if ctx.method == Method::GET => index(service, &ctx).await,
        ("blogs", "details") if ctx.method == Method::GET => details(service, &ctx).await,
        ("blogs", "create") if ctx.method == Method::POST => create(service, &ctx).await,
        _ => Err(AppError::NotFound),
    }
}

/// List entries; with `?page=&per_page=` returns one page with metadata.
async fn index(service: Arc<dyn BlogService>, ctx: &RequestContext) -> AppResult<Response> {
    if ctx.uri.query().unwrap_or_default().is_empty() {
        let blogs = service.list_blogs().await?;
        return Ok(Json(ApiResponse::success(blogs)).into_response());
    }

    let Query(params) = Query::<PaginationParams>::try_from_uri(&ctx.uri)
        .map_err(|e| AppError::bad_request(e.to_string()))?;

    let page = service.list_blogs_page(params).await?;
    Ok(Json(ApiResponse::success(page)).into_response())
}

/// Fetch a single entry by the bound `id` segment.
async fn details(service: Arc<dyn BlogService>, ctx: &RequestContext) -> AppResult<Response> {
    let id: i32 = ctx
        .values
        .get("id")
        .ok_or_else(|| AppError::bad_request("id is required"))?
        .parse()
        .map_err(|_| AppError::bad_request("id must be an integer"))?;

    let blog = service.get_blog(id).await?;
    Ok(Json(ApiResponse::success(blog)).into_response())
}

/// Create an entry from a JSON body.
async fn create(service: Arc<dyn BlogService>, ctx: &RequestContext) -> AppResult<Response> {
    let ValidatedJson(payload) = ValidatedJson::<CreateBlogRequest>::from_bytes(&ctx.body)?;
    let blog = service.create_blog(payload.url).await?;
    Ok(Created(blog).into_response())
}
