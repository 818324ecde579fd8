//! Instrumented collaborators for exercising the order service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use uuid::Uuid;

use crate::cache::CacheBackend;
use crate::error::{CacheError, CacheResult, StoreError, StoreResult};
use crate::models::Order;
use crate::repository::{MemoryOrderRepository, OrderRepository};

// == Recording Cache ==
/// Cache that counts every call and can be told to fail each operation.
#[derive(Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Instant)>>,
    last_ttl: Mutex<Option<Duration>>,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
            + self.sets.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }

    /// Live-entry check that is not recorded as a call.
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .is_some_and(|(_, expires_at)| Instant::now() < *expires_at)
    }

    /// Plants raw bytes under `key`, bypassing the service.
    pub fn plant(&self, key: &str, bytes: &[u8]) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            (bytes.to_vec(), Instant::now() + Duration::from_secs(300)),
        );
    }

    pub fn last_ttl(&self) -> Option<Duration> {
        *self.last_ttl.lock().unwrap()
    }
}

#[async_trait]
impl CacheBackend for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("get refused".into()));
        }

        let mut entries = self.entries.lock().unwrap();
        let Some((bytes, expires_at)) = entries.get(key).cloned() else {
            return Ok(None);
        };
        if Instant::now() < expires_at {
            Ok(Some(bytes))
        } else {
            entries.remove(key);
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("set refused".into()));
        }

        *self.last_ttl.lock().unwrap() = Some(ttl);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(CacheError::Unavailable("delete refused".into()));
        }

        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// == Flaky Repository ==
/// In-memory store that counts lookups and can be told to fail.
#[derive(Default)]
pub struct FlakyRepository {
    inner: MemoryOrderRepository,
    pub lookups: AtomicUsize,
    pub fail_lookup: AtomicBool,
    pub fail_insert: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    /// Removes the order just before applying an update, as a concurrent delete would
    pub vanish_before_update: AtomicBool,
}

impl FlakyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an order directly, e.g. one with a chosen timestamp.
    pub async fn seed(&self, order: Order) -> Uuid {
        let id = order.id;
        self.inner.insert(order).await.unwrap();
        id
    }

    fn check(flag: &AtomicBool, op: &str) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(format!("{} refused", op)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OrderRepository for FlakyRepository {
    async fn lookup(&self, id: Uuid) -> StoreResult<Option<Order>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Self::check(&self.fail_lookup, "lookup")?;
        self.inner.lookup(id).await
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        self.inner.list_all().await
    }

    async fn insert(&self, order: Order) -> StoreResult<Order> {
        Self::check(&self.fail_insert, "insert")?;
        self.inner.insert(order).await
    }

    async fn update(&self, order: Order) -> StoreResult<Order> {
        Self::check(&self.fail_update, "update")?;
        if self.vanish_before_update.load(Ordering::SeqCst) {
            self.inner.delete(order.id).await?;
        }
        self.inner.update(order).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        Self::check(&self.fail_delete, "delete")?;
        self.inner.delete(id).await
    }

    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        self.inner.exists(id).await
    }
}
