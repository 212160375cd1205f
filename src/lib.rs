//! Blogstore - a minimal blog-entry web service
//!
//! A web service exposing blog-entry records backed by a relational
//! store, with data-driven schema evolution and an MVC-style route
//! dispatcher.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Layered configuration and constants
//! - **domain**: Blog entry model and validation
//! - **services**: Application use cases
//! - **infra**: Infrastructure concerns (store connection, migrator, repositories)
//! - **routing**: Route templates and the dispatch table
//! - **api**: HTTP handlers, route registration, and application state
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod routing;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::Blog;
pub use errors::{AppError, AppResult};
