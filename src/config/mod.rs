//! Application configuration module
//!
//! Handles the layered settings file / environment configuration and
//! application-wide constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
