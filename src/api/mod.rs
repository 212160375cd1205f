//! API layer - HTTP handlers and route registration
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers
//! - Validated request payloads
//! - Route registration and the dispatch shim
//! - Application state

pub mod handlers;
pub mod payload;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
