//! Integration tests for Storekeep.
//!
//! # Running Tests
//!
//! ```bash
//! # In-memory flow tests
//! cargo test -p storekeep-integration-tests
//!
//! # Database-backed tests (need PostgreSQL, run serially)
//! STOREKEEP_TEST_DATABASE_URL=postgres://localhost/storekeep_test \
//!     cargo test -p storekeep-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! The crate root holds shared test support: a seeded in-memory shop and a
//! call-recording store wrapper for asserting what the purge actually does.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use storekeep_core::{Account, AccountId, Email, EntityKind, MemoryStore, PurgeStore, StoreError};

/// One observed call against a [`RecordingStore`], in trait-method terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Count(EntityKind),
    DeleteAll(EntityKind),
    StaffAccounts,
    DeleteAccountsExcept(Vec<AccountId>),
    DeleteAccounts(Vec<AccountId>),
    DeleteAddressesOf(AccountId),
}

/// A [`PurgeStore`] that records every call before delegating to an
/// in-memory store.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    calls: Mutex<Vec<StoreCall>>,
}

impl RecordingStore {
    #[must_use]
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls observed so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The wrapped in-memory store, for inspecting shop state.
    #[must_use]
    pub const fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn record(&self, call: StoreCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

#[async_trait]
impl PurgeStore for RecordingStore {
    async fn count_all(&self, kind: EntityKind) -> Result<u64, StoreError> {
        self.record(StoreCall::Count(kind));
        self.inner.count_all(kind).await
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<(), StoreError> {
        self.record(StoreCall::DeleteAll(kind));
        self.inner.delete_all(kind).await
    }

    async fn staff_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.record(StoreCall::StaffAccounts);
        self.inner.staff_accounts().await
    }

    async fn delete_accounts_except(&self, keep: &[AccountId]) -> Result<u64, StoreError> {
        self.record(StoreCall::DeleteAccountsExcept(keep.to_vec()));
        self.inner.delete_accounts_except(keep).await
    }

    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<u64, StoreError> {
        self.record(StoreCall::DeleteAccounts(ids.to_vec()));
        self.inner.delete_accounts(ids).await
    }

    async fn delete_addresses_of(&self, account: AccountId) -> Result<u64, StoreError> {
        self.record(StoreCall::DeleteAddressesOf(account));
        self.inner.delete_addresses_of(account).await
    }
}

/// A shop with rows in several categories, one superuser (id 1), two plain
/// staff (ids 2 and 3) and two customers (ids 4 and 5), each with saved
/// addresses. The staff address total comes to 6.
#[must_use]
pub fn seeded_shop() -> MemoryStore {
    let store = MemoryStore::new();
    store.seed_rows(EntityKind::Checkouts, 2);
    store.seed_rows(EntityKind::Payments, 3);
    store.seed_rows(EntityKind::Orders, 5);
    store.seed_rows(EntityKind::Products, 10);
    store.seed_rows(EntityKind::Categories, 4);
    store.seed_rows(EntityKind::ShippingZones, 1);
    store.seed_rows(EntityKind::GiftCards, 1);
    store.seed_rows(EntityKind::Warehouses, 2);

    store.insert_account(account(1, true, true));
    store.insert_account(account(2, true, false));
    store.insert_account(account(3, true, false));
    store.insert_account(account(4, false, false));
    store.insert_account(account(5, false, false));

    store.seed_addresses(AccountId::new(1), 2);
    store.seed_addresses(AccountId::new(2), 1);
    store.seed_addresses(AccountId::new(3), 3);
    store.seed_addresses(AccountId::new(4), 4);

    store
}

/// Build an account row for tests.
#[must_use]
pub fn account(id: i32, is_staff: bool, is_superuser: bool) -> Account {
    Account {
        id: AccountId::new(id),
        email: Email::parse(&format!("account{id}@example.com")).expect("valid test email"),
        is_staff,
        is_superuser,
        created_at: Utc::now(),
    }
}
