//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREKEEP_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//!
//! ## Optional
//! - `DEBUG` - Whether the deployment runs in debug mode (default: false)

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Whether the deployment runs in debug mode
    pub debug: bool,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or `DEBUG` holds
    /// an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("STOREKEEP_DATABASE_URL")?;
        let debug = match std::env::var("DEBUG") {
            Ok(raw) if raw.trim().is_empty() => false,
            Ok(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidEnvVar("DEBUG".to_string(), raw))?,
            Err(_) => false,
        };

        Ok(Self {
            database_url,
            debug,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get database URL with fallback to generic `DATABASE_URL` (used by Fly.io postgres attach).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    resolve_database_url(
        primary_key,
        std::env::var(primary_key).ok(),
        std::env::var("DATABASE_URL").ok(),
    )
}

/// Pick the connection string from the candidate values: the service-specific
/// variable wins over the generic `DATABASE_URL` (set by Fly.io postgres
/// attach). When both are absent, the error names `primary_key`.
fn resolve_database_url(
    primary_key: &str,
    primary: Option<String>,
    fallback: Option<String>,
) -> Result<SecretString, ConfigError> {
    primary
        .or(fallback)
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Parse a boolean environment value.
///
/// Accepts `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`, case-insensitive.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
