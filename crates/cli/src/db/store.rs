//! `PostgreSQL`-backed purge store.
//!
//! Queries are built at runtime because the table varies per entity
//! category. The table name is always taken from [`table`], a closed mapping
//! over [`EntityKind`], never from user input, so the SQL stays
//! injection-safe without bind parameters for identifiers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use storekeep_core::{Account, AccountId, Email, EntityKind, PurgeStore, StoreError};

/// Purge store backed by the shop `PostgreSQL` schema.
///
/// Several shop tables (`shop.order`, `shop.transaction`) are named after SQL
/// reserved words; schema qualification keeps them unambiguous. Child rows
/// (order lines, checkout lines, product variants, page translations and so
/// on) hang off their parent tables with `ON DELETE CASCADE`, so deleting a
/// category also clears its dependents.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Table backing each entity category.
const fn table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Checkouts => "shop.checkout",
        EntityKind::TransactionItems => "shop.transaction_item",
        EntityKind::Transactions => "shop.transaction",
        EntityKind::Payments => "shop.payment",
        EntityKind::Orders => "shop.order",
        EntityKind::Products => "shop.product",
        EntityKind::ProductTypes => "shop.product_type",
        EntityKind::Attributes => "shop.attribute",
        EntityKind::Categories => "shop.category",
        EntityKind::Collections => "shop.collection",
        EntityKind::Promotions => "shop.promotion",
        EntityKind::ShippingMethods => "shop.shipping_method",
        EntityKind::ShippingZones => "shop.shipping_zone",
        EntityKind::Vouchers => "shop.voucher",
        EntityKind::GiftCards => "shop.gift_card",
        EntityKind::Warehouses => "shop.warehouse",
        EntityKind::Pages => "shop.page",
        EntityKind::PageTypes => "shop.page_type",
        EntityKind::Webhooks => "shop.webhook",
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i32,
    email: String,
    is_staff: bool,
    is_superuser: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = StoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            StoreError::DataCorruption(format!("invalid email for account {}: {e}", row.id))
        })?;

        Ok(Self {
            id: AccountId::new(row.id),
            email,
            is_staff: row.is_staff,
            is_superuser: row.is_superuser,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PurgeStore for PgStore {
    async fn count_all(&self, kind: EntityKind) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table(kind));
        let count: i64 = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn delete_all(&self, kind: EntityKind) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {}", table(kind));
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(StoreError::database)?;

        Ok(())
    }

    async fn staff_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            r"
            SELECT id, email, is_staff, is_superuser, created_at
            FROM shop.account
            WHERE is_staff OR is_superuser
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::database)?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn delete_accounts_except(&self, keep: &[AccountId]) -> Result<u64, StoreError> {
        let keep: Vec<i32> = keep.iter().map(AccountId::as_i32).collect();
        let result = sqlx::query("DELETE FROM shop.account WHERE id <> ALL($1)")
            .bind(&keep)
            .execute(&self.pool)
            .await
            .map_err(StoreError::database)?;

        Ok(result.rows_affected())
    }

    async fn delete_accounts(&self, ids: &[AccountId]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i32> = ids.iter().map(AccountId::as_i32).collect();
        let result = sqlx::query("DELETE FROM shop.account WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&self.pool)
            .await
            .map_err(StoreError::database)?;

        Ok(result.rows_affected())
    }

    async fn delete_addresses_of(&self, account: AccountId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM shop.address WHERE account_id = $1")
            .bind(account)
            .execute(&self.pool)
            .await
            .map_err(StoreError::database)?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Tests
// =============================================================================
