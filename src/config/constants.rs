//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Pagination
// =============================================================================

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum allowed items per page to prevent excessive queries
pub const MAX_PAGE_SIZE: u64 = 100;

/// Default starting page number (1-indexed)
pub const DEFAULT_PAGE_NUMBER: u64 = 1;

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Maximum accepted request body size in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Directory served under /static
pub const STATIC_DIR: &str = "static";

// =============================================================================
// Configuration Sources
// =============================================================================

/// Default settings file path (overridable via --config / CONFIG_PATH)
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Default logging level when neither the settings file nor LOG_LEVEL set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Database
// =============================================================================

/// Maximum connections held by the store pool
pub const MAX_DB_CONNECTIONS: u32 = 10;

/// Connection string schemes the service knows how to drive
pub const SUPPORTED_DB_SCHEMES: &[&str] = &["postgres", "postgresql", "sqlite"];

// =============================================================================
// Validation
// =============================================================================

/// Maximum length of a blog entry url
pub const MAX_URL_LENGTH: u64 = 100;
