//! Database-backed tests for the `PostgreSQL` purge store.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - `STOREKEEP_TEST_DATABASE_URL` (or `STOREKEEP_DATABASE_URL`) pointing at
//!   a database that may be dropped and recreated
//!
//! Each test rebuilds the `shop` schema from scratch, so they must not run
//! in parallel. Run with:
//! `cargo test -p storekeep-integration-tests -- --ignored --test-threads=1`

use secrecy::SecretString;
use sqlx::PgPool;

use storekeep_cli::db::{self, PgStore};
use storekeep_core::{EntityKind, PurgeOptions, PurgeStore, StoreError, run_purge};

/// Minimal rendition of the shop schema: one table per purged category, a
/// cascading child under `shop.order`, and the account/address pair.
const SCHEMA_SQL: &str = r"
DROP SCHEMA IF EXISTS shop CASCADE;
CREATE SCHEMA shop;

CREATE TABLE shop.checkout (id integer PRIMARY KEY);
CREATE TABLE shop.transaction_item (id integer PRIMARY KEY);
CREATE TABLE shop.transaction (id integer PRIMARY KEY);
CREATE TABLE shop.payment (id integer PRIMARY KEY);
CREATE TABLE shop.order (id integer PRIMARY KEY);
CREATE TABLE shop.order_line (
    id integer PRIMARY KEY,
    order_id integer NOT NULL REFERENCES shop.order (id) ON DELETE CASCADE
);
CREATE TABLE shop.product (id integer PRIMARY KEY);
CREATE TABLE shop.product_type (id integer PRIMARY KEY);
CREATE TABLE shop.attribute (id integer PRIMARY KEY);
CREATE TABLE shop.category (id integer PRIMARY KEY);
CREATE TABLE shop.collection (id integer PRIMARY KEY);
CREATE TABLE shop.promotion (id integer PRIMARY KEY);
CREATE TABLE shop.shipping_method (id integer PRIMARY KEY);
CREATE TABLE shop.shipping_zone (id integer PRIMARY KEY);
CREATE TABLE shop.voucher (id integer PRIMARY KEY);
CREATE TABLE shop.gift_card (id integer PRIMARY KEY);
CREATE TABLE shop.warehouse (id integer PRIMARY KEY);
CREATE TABLE shop.page (id integer PRIMARY KEY);
CREATE TABLE shop.page_type (id integer PRIMARY KEY);
CREATE TABLE shop.webhook (id integer PRIMARY KEY);

CREATE TABLE shop.account (
    id integer PRIMARY KEY,
    email text NOT NULL,
    is_staff boolean NOT NULL DEFAULT false,
    is_superuser boolean NOT NULL DEFAULT false,
    created_at timestamptz NOT NULL DEFAULT now()
);
CREATE TABLE shop.address (
    id integer PRIMARY KEY,
    account_id integer NOT NULL REFERENCES shop.account (id) ON DELETE CASCADE
);
";

const SEED_SQL: &str = r"
INSERT INTO shop.checkout (id) SELECT generate_series(1, 2);
INSERT INTO shop.payment (id) SELECT generate_series(1, 3);
INSERT INTO shop.order (id) SELECT generate_series(1, 5);
INSERT INTO shop.order_line (id, order_id) SELECT n, (n % 5) + 1 FROM generate_series(1, 12) AS n;
INSERT INTO shop.product (id) SELECT generate_series(1, 10);
INSERT INTO shop.category (id) SELECT generate_series(1, 4);
INSERT INTO shop.shipping_zone (id) VALUES (1);
INSERT INTO shop.gift_card (id) VALUES (1);
INSERT INTO shop.warehouse (id) SELECT generate_series(1, 2);

INSERT INTO shop.account (id, email, is_staff, is_superuser) VALUES
    (1, 'root@example.com', true, true),
    (2, 'staff-a@example.com', true, false),
    (3, 'staff-b@example.com', true, false),
    (4, 'customer-a@example.com', false, false),
    (5, 'customer-b@example.com', false, false);

INSERT INTO shop.address (id, account_id) VALUES
    (1, 1), (2, 1),
    (3, 2),
    (4, 3), (5, 3), (6, 3),
    (7, 4), (8, 4), (9, 4), (10, 4);
";

async fn test_pool() -> PgPool {
    let url = std::env::var("STOREKEEP_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("STOREKEEP_DATABASE_URL"))
        .map(SecretString::from)
        .expect("set STOREKEEP_TEST_DATABASE_URL to run database tests");

    db::create_pool(&url)
        .await
        .expect("failed to connect to test database")
}

async fn fresh_shop(pool: &PgPool) {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .expect("failed to create shop schema");
    sqlx::raw_sql(SEED_SQL)
        .execute(pool)
        .await
        .expect("failed to seed shop schema");
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_full_purge_round_trip() {
    let pool = test_pool().await;
    fresh_shop(&pool).await;
    let store = PgStore::new(pool.clone());

    let options = PurgeOptions {
        debug_mode: true,
        ..PurgeOptions::default()
    };
    let mut sink = Vec::new();
    let report = run_purge(&store, &options, &EntityKind::PURGE_ORDER, &mut sink)
        .await
        .expect("purge should succeed against seeded schema");

    // 28 category rows, 2 customers, 6 staff addresses.
    assert_eq!(report.total_removed(), 36);

    let transcript = String::from_utf8(sink).expect("transcript should be utf8");
    assert!(transcript.contains("Removed orders, total: 5"));
    assert!(transcript.contains("Removed categories, total: 4"));
    assert!(transcript.contains("Removed shipping zones, total: 1"));
    assert!(transcript.ends_with("Removed staff addresses, total: 6\n"));

    // Order lines ride along with their orders.
    assert_eq!(count(&pool, "shop.order").await, 0);
    assert_eq!(count(&pool, "shop.order_line").await, 0);

    // Customers are gone with their addresses; staff remain, address-less.
    assert_eq!(count(&pool, "shop.account").await, 3);
    assert_eq!(count(&pool, "shop.address").await, 0);

    // A second run over the emptied schema reports nothing removed.
    let mut sink = Vec::new();
    let report = run_purge(&store, &options, &EntityKind::PURGE_ORDER, &mut sink)
        .await
        .expect("second purge should succeed");
    assert_eq!(report.total_removed(), 0);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_delete_staff_round_trip() {
    let pool = test_pool().await;
    fresh_shop(&pool).await;
    let store = PgStore::new(pool.clone());

    let options = PurgeOptions {
        delete_staff: true,
        debug_mode: true,
        ..PurgeOptions::default()
    };
    let mut sink = Vec::new();
    run_purge(&store, &options, &EntityKind::PURGE_ORDER, &mut sink)
        .await
        .expect("purge should succeed against seeded schema");

    let remaining: Vec<i32> = sqlx::query_scalar("SELECT id FROM shop.account ORDER BY id")
        .fetch_all(&pool)
        .await
        .expect("failed to list remaining accounts");
    assert_eq!(remaining, vec![1]);
}

#[tokio::test]
#[ignore = "Requires a running PostgreSQL database"]
async fn test_corrupt_staff_email_is_reported() {
    let pool = test_pool().await;
    fresh_shop(&pool).await;
    sqlx::raw_sql("UPDATE shop.account SET email = 'not-an-email' WHERE id = 2")
        .execute(&pool)
        .await
        .expect("failed to corrupt test row");

    let store = PgStore::new(pool);
    let err = store
        .staff_accounts()
        .await
        .expect_err("corrupt email should fail the staff query");

    assert!(matches!(err, StoreError::DataCorruption(_)));
    assert!(err.to_string().contains("account 2"));
}
