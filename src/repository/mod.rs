//! Durable Order Store
//!
//! The store is the single source of truth for orders. The order service
//! only talks to it through [`OrderRepository`].

mod file;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::Order;

pub use file::FileOrderRepository;
pub use memory::MemoryOrderRepository;

// == Order Repository ==
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Point lookup by identifier.
    async fn lookup(&self, id: Uuid) -> StoreResult<Option<Order>>;

    /// Every order, newest `created_at` first.
    async fn list_all(&self) -> StoreResult<Vec<Order>>;

    /// Persists a new order. Fails on a duplicate identifier; on failure
    /// nothing is stored.
    async fn insert(&self, order: Order) -> StoreResult<Order>;

    /// Replaces an existing order. Fails if the identifier is not stored.
    async fn update(&self, order: Order) -> StoreResult<Order>;

    /// Removes an order. Removing an absent identifier is a no-op.
    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    async fn exists(&self, id: Uuid) -> StoreResult<bool>;
}

/// Sorts newest first; equal timestamps fall back to id order so scans are stable.
pub(crate) fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
}
