//! Request handlers.

pub mod blog_handler;
pub mod health_handler;
