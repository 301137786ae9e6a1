use std::sync::Arc;

use serde_json::Value;

use crate::discounts::models::{DiscountKind, DiscountRecord, CATCH_ALL_OPTION};
use crate::error::ApiError;
use crate::store::OptionStore;

/// Repository for discount collections in the option store
///
/// Reads are permissive: a stored value that is absent or not a list of
/// records normalizes to an empty collection and never surfaces as an
/// error. Writes are strict: a store-reported failure becomes
/// `PersistFailed`.
#[derive(Clone)]
pub struct DiscountRepository {
    store: Arc<dyn OptionStore>,
}

impl DiscountRepository {
    /// Create a new DiscountRepository over the given store
    pub fn new(store: Arc<dyn OptionStore>) -> Self {
        Self { store }
    }

    /// Load one collection, normalizing absent or non-list values to empty
    ///
    /// Normalization stops at the collection shape: individual records are
    /// opaque and come back verbatim whatever their internals look like.
    pub async fn load_collection(&self, key: &str) -> Result<Vec<DiscountRecord>, ApiError> {
        let stored = self.store.get(key).await?;

        let records = match stored {
            Some(Value::Array(items)) => items.into_iter().map(DiscountRecord).collect(),
            _ => Vec::new(),
        };

        Ok(records)
    }

    /// Load the five typed collections concatenated in their fixed order
    ///
    /// Each source keeps its internal order, so the result is a stable
    /// partition ready for the chronological sort.
    pub async fn load_all_typed(&self) -> Result<Vec<DiscountRecord>, ApiError> {
        let mut all = Vec::new();
        for kind in DiscountKind::ALL {
            let mut records = self.load_collection(kind.option_key()).await?;
            tracing::debug!(
                "Loaded {} records from {}",
                records.len(),
                kind.option_key()
            );
            all.append(&mut records);
        }
        Ok(all)
    }

    /// The catch-all collection exactly as stored, defaulting to an empty
    /// list when the key is absent
    pub async fn load_catch_all_raw(&self) -> Result<Value, ApiError> {
        let stored = self.store.get(CATCH_ALL_OPTION).await?;
        Ok(stored.unwrap_or_else(|| Value::Array(Vec::new())))
    }

    /// Append one sanitized record to the catch-all collection
    ///
    /// Read-modify-write with no conflict detection: two concurrent appends
    /// can both read the same prior state and the later write wins,
    /// dropping the other record. Last-writer-wins is the documented
    /// contract of this collection.
    pub async fn append(&self, record: Value) -> Result<(), ApiError> {
        let mut records = match self.store.get(CATCH_ALL_OPTION).await? {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        records.push(record);

        let saved = self.store.set(CATCH_ALL_OPTION, Value::Array(records)).await?;
        if !saved {
            return Err(ApiError::PersistFailed);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryOptionStore;
    use serde_json::json;

    fn repo_with_store() -> (DiscountRepository, Arc<MemoryOptionStore>) {
        let store = Arc::new(MemoryOptionStore::new());
        (DiscountRepository::new(store.clone()), store)
    }

    #[tokio::test]
    async fn absent_collection_loads_as_empty() {
        let (repo, _store) = repo_with_store();
        let records = repo.load_collection("aio_bogo_discount").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn malformed_collection_values_load_as_empty() {
        let (repo, store) = repo_with_store();

        store.seed("aio_bogo_discount", json!("corrupted")).await;
        store.seed("aio_bulk_discount", json!({ "not": "a list" })).await;
        store.seed("aio_shipping_discount", json!(null)).await;

        for key in ["aio_bogo_discount", "aio_bulk_discount", "aio_shipping_discount"] {
            assert!(repo.load_collection(key).await.unwrap().is_empty(), "{key}");
        }
    }

    #[tokio::test]
    async fn load_all_typed_concatenates_in_fixed_order() {
        let (repo, store) = repo_with_store();

        store
            .seed("aio_bulk_discount", json!([{ "name": "bulk-1" }]))
            .await;
        store
            .seed(
                "aio_flatpercentage_discount",
                json!([{ "name": "flat-1" }, { "name": "flat-2" }]),
            )
            .await;

        let all = repo.load_all_typed().await.unwrap();
        let names: Vec<&Value> = all.iter().map(|r| &r.0["name"]).collect();
        assert_eq!(names, vec![&json!("flat-1"), &json!("flat-2"), &json!("bulk-1")]);
    }

    #[tokio::test]
    async fn collection_records_pass_through_verbatim() {
        let (repo, store) = repo_with_store();

        // internals no intake path of this service would produce
        store
            .seed(
                "aio_shipping_discount",
                json!([
                    {
                        "createdAt": 1_700_000_000,
                        "conditions": [{ "field": "cart_subtotal_price", "value": 5.5 }]
                    },
                    "stray entry",
                    7
                ]),
            )
            .await;

        let records = repo.load_collection("aio_shipping_discount").await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].0["conditions"][0]["value"], json!(5.5));
        assert_eq!(records[1].0, json!("stray entry"));
        assert_eq!(records[2].0, json!(7));
    }

    #[tokio::test]
    async fn append_creates_and_extends_the_catch_all_collection() {
        let (repo, _store) = repo_with_store();

        repo.append(json!({ "name": "first" })).await.unwrap();
        repo.append(json!({ "name": "second" })).await.unwrap();

        let raw = repo.load_catch_all_raw().await.unwrap();
        assert_eq!(raw, json!([{ "name": "first" }, { "name": "second" }]));
    }

    #[tokio::test]
    async fn append_resets_a_malformed_catch_all_value() {
        let (repo, store) = repo_with_store();
        store.seed(CATCH_ALL_OPTION, json!("corrupted")).await;

        repo.append(json!({ "name": "fresh" })).await.unwrap();

        let raw = repo.load_catch_all_raw().await.unwrap();
        assert_eq!(raw, json!([{ "name": "fresh" }]));
    }

    #[tokio::test]
    async fn append_surfaces_store_write_failure() {
        let (repo, store) = repo_with_store();
        store.set_fail_writes(true);

        let result = repo.append(json!({ "name": "doomed" })).await;
        assert!(matches!(result, Err(ApiError::PersistFailed)));
    }

    /// Store double that parks one read until another request has written,
    /// forcing two appends into the same read-modify-write window.
    struct StalledReadStore {
        inner: MemoryOptionStore,
        release: tokio::sync::Notify,
        stall_next_read: std::sync::atomic::AtomicBool,
    }

    impl StalledReadStore {
        fn new() -> Self {
            Self {
                inner: MemoryOptionStore::new(),
                release: tokio::sync::Notify::new(),
                stall_next_read: std::sync::atomic::AtomicBool::new(true),
            }
        }
    }

    #[axum::async_trait]
    impl crate::store::OptionStore for StalledReadStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, crate::store::StoreError> {
            // snapshot first, then park: the caller proceeds with stale state
            let value = self.inner.get(key).await?;
            if self
                .stall_next_read
                .swap(false, std::sync::atomic::Ordering::SeqCst)
            {
                self.release.notified().await;
            }
            Ok(value)
        }

        async fn set(&self, key: &str, value: Value) -> Result<bool, crate::store::StoreError> {
            let saved = self.inner.set(key, value).await?;
            self.release.notify_one();
            Ok(saved)
        }
    }

    /// Documents the accepted read-modify-write race: two submissions that
    /// read the same prior state both report success, but only the later
    /// write is retained.
    #[tokio::test]
    async fn lost_update_window_on_concurrent_append() {
        let store = Arc::new(StalledReadStore::new());
        let repo = DiscountRepository::new(store);

        // the first append reads the empty collection and stalls; the
        // second runs to completion before the first writes
        let stalled = repo.append(json!({ "name": "first" }));
        let overtaking = repo.append(json!({ "name": "second" }));
        let (first, second) = tokio::join!(stalled, overtaking);
        first.unwrap();
        second.unwrap();

        // last writer wins; the overtaken record is gone
        let raw = repo.load_catch_all_raw().await.unwrap();
        assert_eq!(raw, json!([{ "name": "first" }]));
    }
}
