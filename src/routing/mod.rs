//! Route dispatcher - maps inbound method + path to a handler.
//!
//! Routes are an ordered table of (method, template, handler); the first
//! registered route whose method and template fit the request wins.
//! Handlers are boxed async closures that close over whatever services
//! they need, so no global registry is involved.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{Method, Uri};
use axum::response::Response;
use futures::future::BoxFuture;

use crate::errors::AppResult;

pub mod table;
pub mod template;

pub use table::RouteTable;
pub use template::{RouteTemplate, RouteValues, TemplateError};

/// Everything a handler gets about the request it serves.
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub values: RouteValues,
    pub body: Bytes,
}

/// A registered handler: called once per matched request.
pub type RouteHandler = Arc<dyn Fn(RequestContext) -> BoxFuture<'static, AppResult<Response>> + Send + Sync>;
