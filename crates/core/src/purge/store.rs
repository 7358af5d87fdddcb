//! The persistence capability the purge drives.

use async_trait::async_trait;

use crate::types::{Account, AccountId, EntityKind};

/// Errors surfaced by a [`PurgeStore`] implementation.
///
/// The purge performs no retries and no rollback; any store error aborts the
/// run and leaves the data in whatever partial state existed at failure time.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database failed.
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl StoreError {
    /// Wrap a backend error (e.g. a driver error) as [`StoreError::Database`].
    pub fn database<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database(Box::new(err))
    }
}

/// What the purge needs from a persistence layer.
///
/// Per entity category: a row count and a bulk delete. For accounts: the
/// staff subset, deletion of a complement or an explicit set, and per-account
/// address removal. Referential-integrity cascades (order lines with their
/// order, addresses with their account, and so on) are the store's job, not
/// the caller's.
#[async_trait]
pub trait PurgeStore {
    /// Number of rows currently in the category.
    async fn count_all(&self, kind: EntityKind) -> Result<u64, StoreError>;

    /// Delete every row in the category.
    async fn delete_all(&self, kind: EntityKind) -> Result<(), StoreError>;

    /// Accounts flagged as staff or superuser.
    async fn staff_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Delete every account whose id is not in `keep`.
    ///
    /// Returns the number of accounts removed. An empty `keep` deletes all
    /// accounts.
    async fn delete_accounts_except(&self, keep: &[AccountId]) -> Result<u64, StoreError>;

    /// Delete the given accounts, returning the number actually removed.
    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<u64, StoreError>;

    /// Delete all addresses owned by one account, returning the number removed.
    async fn delete_addresses_of(&self, account: AccountId) -> Result<u64, StoreError>;
}
