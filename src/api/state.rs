//! Application state - explicitly constructed dependencies.
//!
//! Each component is built here and handed references directly; there is
//! no registry to scan. Construction order mirrors the bootstrap chain:
//! store connection in, repository, service, then the route table whose
//! handlers close over the service.

use std::sync::Arc;

use crate::api::routes::build_route_table;
use crate::errors::AppResult;
use crate::infra::{BlogRepository, BlogStore, Database};
use crate::routing::RouteTable;
use crate::services::{BlogManager, BlogService};

/// Application state shared with the dispatcher.
#[derive(Clone)]
pub struct AppState {
    /// Blog entry service
    pub blog_service: Arc<dyn BlogService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Ordered route table
    pub routes: Arc<RouteTable>,
}

impl AppState {
    /// Build the full component graph over a connected store.
    pub fn new(database: Arc<Database>) -> AppResult<Self> {
        let repo: Arc<dyn BlogRepository> = Arc::new(BlogStore::new(database.get_connection()));
        let blog_service: Arc<dyn BlogService> = Arc::new(BlogManager::new(repo));
        let routes = Arc::new(build_route_table(database.clone(), blog_service.clone())?);

        Ok(Self {
            blog_service,
            database,
            routes,
        })
    }
}
