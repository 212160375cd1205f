//! Route registration and the axum dispatch shim.
//!
//! The dispatcher owns the whole dynamic surface: axum contributes the
//! listener plumbing, static file serving, request tracing and panic
//! containment, and hands every remaining request to the route table via
//! its fallback.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::Method,
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::api::handlers::{blog_handler, health_handler};
use crate::config::{MAX_BODY_BYTES, STATIC_DIR};
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::routing::{RequestContext, RouteTable};
use crate::services::BlogService;

use super::AppState;

/// The MVC-style default route.
const DEFAULT_ROUTE: &str = "{controller=Home}/{action=Index}/{id?}";

/// Register every route, in precedence order.
///
/// The literal `health` route precedes the default template, so
/// `GET /health` never binds `controller=health`.
pub fn build_route_table(
    database: Arc<Database>,
    service: Arc<dyn BlogService>,
) -> AppResult<RouteTable> {
    let get_service = service.clone();
    let post_service = service;

    let table = RouteTable::new()
        .route(Method::GET, "health", move |_ctx| {
            let database = database.clone();
            async move { health_handler::health(database).await }
        })?
        .route(Method::GET, DEFAULT_ROUTE, move |ctx| {
            let service = get_service.clone();
            async move { blog_handler::dispatch_action(service, ctx).await }
        })?
        .route(Method::POST, DEFAULT_ROUTE, move |ctx| {
            let service = post_service.clone();
            async move { blog_handler::dispatch_action(service, ctx).await }
        })?;

    Ok(table)
}

/// Create the application router with the dispatcher mounted as fallback
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(dispatch)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

/// Per-request dispatch: match, bind, invoke.
///
/// A missing route is a 404; a handler error maps through the error
/// taxonomy; neither ever takes the listener down.
async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();

    let Some((handler, values)) = state.routes.match_request(&parts.method, parts.uri.path())
    else {
        return AppError::NotFound.into_response();
    };

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::bad_request(format!("cannot read request body: {}", e))
                .into_response()
        }
    };

    let ctx = RequestContext {
        method: parts.method,
        uri: parts.uri,
        values,
        body,
    };

    match handler(ctx).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    }
}
