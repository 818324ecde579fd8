//! In-memory order store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{sort_newest_first, OrderRepository};
use crate::error::{StoreError, StoreResult};
use crate::models::Order;

/// Order store kept entirely in process memory.
///
/// Durable only for the lifetime of the process; used for tests and for
/// running without a data file.
#[derive(Debug, Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn from_map(orders: HashMap<Uuid, Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn lookup(&self, id: Uuid) -> StoreResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        sort_newest_first(&mut orders);
        Ok(orders)
    }

    async fn insert(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.id) {
            return Err(StoreError::Duplicate(order.id));
        }
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn update(&self, order: Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(slot) => {
                *slot = order.clone();
                Ok(order)
            }
            None => Err(StoreError::Missing(order.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.orders.write().await.remove(&id);
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.orders.read().await.contains_key(&id))
    }
}
