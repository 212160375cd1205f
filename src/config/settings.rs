//! Application settings loaded from a layered source: an optional JSON
//! settings file as the base, overridden by environment variables.
//!
//! Environment wins on conflict. The connection string is mandatory and
//! validated up front so a misconfigured process fails before anything
//! else is constructed.

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::errors::{AppError, AppResult};

use super::constants::{DEFAULT_LOG_LEVEL, DEFAULT_SETTINGS_PATH, SUPPORTED_DB_SCHEMES};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub log_level: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// Shape of the optional settings file.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseSection {
    connection_string: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingSection {
    level: Option<String>,
}

impl Config {
    /// Load configuration from the settings file and environment.
    ///
    /// `path` overrides the default settings file location; a missing file
    /// is fine (the environment alone may carry everything), a malformed
    /// one is not.
    pub fn load(path: Option<&str>) -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let path = path.unwrap_or(DEFAULT_SETTINGS_PATH);
        let file = Self::read_settings_file(Path::new(path))?;

        Self::resolve(
            file,
            env::var("DATABASE_URL").ok(),
            env::var("LOG_LEVEL").ok(),
        )
    }

    fn read_settings_file(path: &Path) -> AppResult<SettingsFile> {
        if !path.exists() {
            tracing::debug!("Settings file {} not found, using environment only", path.display());
            return Ok(SettingsFile::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("cannot read {}: {}", path.display(), e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| AppError::config(format!("malformed settings file {}: {}", path.display(), e)))
    }

    /// Merge the file layer with environment overrides and validate.
    fn resolve(
        file: SettingsFile,
        env_database_url: Option<String>,
        env_log_level: Option<String>,
    ) -> AppResult<Self> {
        let database_url = env_database_url
            .or(file.database.connection_string)
            .ok_or_else(|| {
                AppError::config(
                    "connection string is not configured \
                     (set DATABASE_URL or database.connection_string in the settings file)",
                )
            })?;

        validate_connection_string(&database_url)?;

        let log_level = env_log_level
            .or(file.logging.level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            database_url,
            log_level,
        })
    }
}

/// Reject connection strings the service cannot possibly drive.
fn validate_connection_string(url: &str) -> AppResult<()> {
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme)
        .unwrap_or_default();

    if scheme.is_empty() || !SUPPORTED_DB_SCHEMES.contains(&scheme) {
        return Err(AppError::config(format!(
            "malformed connection string: unsupported scheme {:?} (expected one of {})",
            scheme,
            SUPPORTED_DB_SCHEMES.join(", ")
        )));
    }

    Ok(())
}
