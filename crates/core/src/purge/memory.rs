use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::store::{PurgeStore, StoreError};
use crate::types::{Account, AccountId, EntityKind};

/// A [`PurgeStore`] backed by process memory.
///
/// Used by the test suites and handy for dry-running the purge without a
/// database. Entity categories are modelled as bare row counts (the purge
/// never inspects individual rows), while accounts and their address counts
/// are kept in full so the staff/customer split behaves like the real schema,
/// including the address cascade when an account is deleted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    rows: HashMap<EntityKind, u64>,
    accounts: Vec<Account>,
    addresses: HashMap<AccountId, u64>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row count for one entity category.
    pub fn seed_rows(&self, kind: EntityKind, count: u64) {
        self.lock().rows.insert(kind, count);
    }

    /// Add an account. Ids are expected to be unique.
    pub fn insert_account(&self, account: Account) {
        self.lock().accounts.push(account);
    }

    /// Set the number of saved addresses owned by one account.
    pub fn seed_addresses(&self, owner: AccountId, count: u64) {
        self.lock().addresses.insert(owner, count);
    }

    /// Current row count for one entity category.
    #[must_use]
    pub fn row_count(&self, kind: EntityKind) -> u64 {
        self.lock().rows.get(&kind).copied().unwrap_or(0)
    }

    /// Ids of all accounts still present, in insertion order.
    #[must_use]
    pub fn account_ids(&self) -> Vec<AccountId> {
        self.lock().accounts.iter().map(|account| account.id).collect()
    }

    /// Current address count for one account.
    #[must_use]
    pub fn address_count(&self, owner: AccountId) -> u64 {
        self.lock().addresses.get(&owner).copied().unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another test thread panicked mid-write;
        // the counters inside are still usable.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PurgeStore for MemoryStore {
    async fn count_all(&self, kind: EntityKind) -> Result<u64, StoreError> {
        Ok(self.lock().rows.get(&kind).copied().unwrap_or(0))
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<(), StoreError> {
        self.lock().rows.remove(&kind);
        Ok(())
    }

    async fn staff_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .filter(|account| account.is_staff_member())
            .cloned()
            .collect())
    }

    async fn delete_accounts_except(&self, keep: &[AccountId]) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        let doomed: Vec<AccountId> = inner
            .accounts
            .iter()
            .filter(|account| !keep.contains(&account.id))
            .map(|account| account.id)
            .collect();
        inner.accounts.retain(|account| keep.contains(&account.id));
        for id in &doomed {
            inner.addresses.remove(id);
        }
        Ok(u64::try_from(doomed.len()).unwrap_or_default())
    }

    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<u64, StoreError> {
        let mut inner = self.lock();
        let before = inner.accounts.len();
        inner.accounts.retain(|account| !ids.contains(&account.id));
        for id in ids {
            inner.addresses.remove(id);
        }
        Ok(u64::try_from(before - inner.accounts.len()).unwrap_or_default())
    }

    async fn delete_addresses_of(&self, account: AccountId) -> Result<u64, StoreError> {
        Ok(self.lock().addresses.remove(&account).unwrap_or(0))
    }
}

// =============================================================================
// Tests
// =============================================================================
