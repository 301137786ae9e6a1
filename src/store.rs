// Option store port
//
// Discount collections are persisted as JSON blobs under string keys, the
// way a key-value options table works. The port is injected into the
// repository so handlers never touch the backing storage directly and tests
// can run against the in-memory implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by option store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database operation errors from the PostgreSQL-backed store
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Key-value access to serialized option blobs
///
/// `set` returns `Ok(false)` when the backend reports that the write did not
/// persist; callers decide whether that is fatal. Errors are reserved for
/// the backend itself failing (connection loss, query errors).
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// Fetch the stored value under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Store `value` under `key`, returning whether the write persisted
    async fn set(&self, key: &str, value: Value) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed option store over the `options` table
#[derive(Clone)]
pub struct PgOptionStore {
    pool: PgPool,
}

impl PgOptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OptionStore for PgOptionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        tracing::debug!("Loading option: {}", key);

        let value: Option<Value> = sqlx::query_scalar(
            "SELECT option_value FROM options WHERE option_name = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> Result<bool, StoreError> {
        tracing::debug!("Storing option: {}", key);

        let result = sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (option_name)
            DO UPDATE SET option_value = EXCLUDED.option_value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory option store for deterministic tests
///
/// `fail_writes` makes every subsequent `set` report a failed write so the
/// persist-failure path can be exercised without a broken backend.
#[derive(Default)]
pub struct MemoryOptionStore {
    data: RwLock<HashMap<String, Value>>,
    fail_writes: AtomicBool,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load a stored value, bypassing the write-failure switch
    pub async fn seed(&self, key: &str, value: Value) {
        self.data.write().await.insert(key.to_string(), value);
    }

    /// Toggle whether writes report failure
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl OptionStore for MemoryOptionStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<bool, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Ok(false);
        }
        self.data.write().await.insert(key.to_string(), value);
        Ok(true)
    }
}
