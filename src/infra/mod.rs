//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and schema migrations
//! - Repositories over the relational store

pub mod db;
pub mod repositories;

pub use db::{catalog, Database, Migration, Migrator, SchemaStep};
pub use repositories::{BlogRepository, BlogStore};
