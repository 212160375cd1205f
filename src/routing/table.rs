//! Ordered route table with first-match-wins lookup.

use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use axum::response::Response;
use futures::future::BoxFuture;

use crate::errors::AppResult;

use super::template::{RouteTemplate, RouteValues, TemplateError};
use super::{RequestContext, RouteHandler};

struct Route {
    method: Method,
    template: RouteTemplate,
    handler: RouteHandler,
}

/// Ordered list of routes; registration order is precedence order.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Templates are parsed and validated here, so a bad
    /// pattern aborts bootstrap instead of surfacing per request.
    pub fn route<H, Fut>(
        mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<Self, TemplateError>
    where
        H: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Response>> + Send + 'static,
    {
        let template = RouteTemplate::parse(pattern)?;
        self.routes.push(Route {
            method,
            template,
            handler: Arc::new(move |ctx| {
                Box::pin(handler(ctx)) as BoxFuture<'static, AppResult<Response>>
            }),
        });
        Ok(self)
    }

    /// Find the first route matching the request, binding its values.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<(RouteHandler, RouteValues)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route
                    .template
                    .matches(path)
                    .map(|values| (route.handler.clone(), values))
            })
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::*;

    fn table() -> RouteTable {
        RouteTable::new()
            .route(Method::GET, "health", |_ctx| async {
                Ok("first".into_response())
            })
            .unwrap()
            .route(Method::GET, "{controller=Home}/{action=Index}/{id?}", |_ctx| async {
                Ok("mvc".into_response())
            })
            .unwrap()
    }

    #[test]
    fn earlier_registration_wins() {
        let table = table();

        // `/health` fits both the literal and the MVC template; the literal
        // was registered first.
        let (_, values) = table.match_request(&Method::GET, "/health").unwrap();
        assert_eq!(values.get("controller"), None);

        let (_, values) = table.match_request(&Method::GET, "/Blogs/Details").unwrap();
        assert_eq!(values.get("controller"), Some("Blogs"));
        assert_eq!(values.get("action"), Some("Details"));
    }

    #[test]
    fn method_must_match() {
        let table = table();
        assert!(table.match_request(&Method::DELETE, "/health").is_none());
    }

    #[test]
    fn unmatched_path_returns_none() {
        let table = table();
        assert!(table
            .match_request(&Method::GET, "/a/b/c/d/e")
            .is_none());
    }
}
