//! Database access for the Storekeep shop `PostgreSQL`.
//!
//! All shop tables live in the `shop` schema. The CLI never creates or
//! migrates them; it only counts and deletes, via [`PgStore`].

pub mod store;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use store::PgStore;

/// Create the `PostgreSQL` connection pool for a maintenance run.
///
/// The purge issues its statements one at a time, so the pool stays small.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
