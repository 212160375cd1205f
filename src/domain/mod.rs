//! Domain layer - Core business entities and logic
//!
//! Contains the blog entry model and its validation rules, independent
//! of infrastructure concerns.

pub mod blog;

pub use blog::{validate_url, Blog};
