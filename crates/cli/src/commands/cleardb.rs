//! Clear shop data from the database.
//!
//! # Usage
//!
//! ```bash
//! # Wipe a debug deployment
//! sk-cli cleardb
//!
//! # Also delete staff accounts (superusers are kept)
//! sk-cli cleardb --delete-staff
//!
//! # Run against a deployment not in debug mode
//! sk-cli cleardb --force
//! ```
//!
//! # Environment Variables
//!
//! - `STOREKEEP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `DEBUG` - guards the command; without `--force` it refuses unless this is truthy

use thiserror::Error;
use tracing::info;

use storekeep_core::{EntityKind, PurgeError, PurgeOptions, run_purge};

use crate::config::{CliConfig, ConfigError};
use crate::db::{self, PgStore};

/// Errors that can occur while clearing the database.
#[derive(Debug, Error)]
pub enum ClearDbError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Connect(#[from] sqlx::Error),

    /// The purge was refused or aborted.
    #[error(transparent)]
    Purge(#[from] PurgeError),
}

/// Remove orders, catalog and customer data while keeping shop configuration.
///
/// Progress is reported line by line on stdout. Staff accounts survive unless
/// `delete_staff` is set (superusers survive regardless); retained accounts
/// keep their logins but lose their saved addresses. Refuses before even
/// connecting when the deployment is not in debug mode and `force` is absent.
///
/// # Errors
///
/// Returns `ClearDbError` if configuration is missing, the database is
/// unreachable, or the purge aborts (including the debug-mode refusal).
pub async fn clear_database(delete_staff: bool, force: bool) -> Result<(), ClearDbError> {
    let config = CliConfig::from_env()?;

    let options = PurgeOptions {
        delete_staff,
        force,
        debug_mode: config.debug,
    };

    // run_purge enforces the same guard; applying it here keeps a refused
    // run from needing a reachable database at all.
    if !options.permitted() {
        return Err(ClearDbError::Purge(PurgeError::Refused));
    }

    info!("Connecting to shop database...");
    let pool = db::create_pool(&config.database_url).await?;
    let store = PgStore::new(pool);

    info!(delete_staff, force, "Clearing shop data");
    let mut stdout = std::io::stdout();
    let report = run_purge(&store, &options, &EntityKind::PURGE_ORDER, &mut stdout).await?;

    info!(
        steps = report.steps.len(),
        removed = report.total_removed(),
        "Database cleared"
    );

    Ok(())
}
