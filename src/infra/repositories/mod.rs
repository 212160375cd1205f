//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod blog_repository;
pub(crate) mod entities;

pub use blog_repository::{BlogRepository, BlogStore};
