//! Cache-aside order service
//!
//! Decides, for every read and mutation, whether to answer from the cache,
//! populate it, or invalidate it. The store is the source of truth; the
//! cache is advisory.
//!
//! Rules enforced here:
//! - reads try the cache first and fall back to the store on any miss,
//!   undecodable payload or cache failure
//! - creates never touch the cache; the first read populates it
//! - list reads always go to the store
//! - deletes and updates change the store first and invalidate second, so a
//!   failed invalidation leaves at worst a stale entry bounded by its TTL
//! - cache failures are logged and swallowed; store failures abort

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::codec::{JsonCodec, PayloadCodec};
use super::keys::{order_cache_key, DEFAULT_ORDER_CACHE_TTL};
use crate::cache::CacheBackend;
use crate::error::{OrderError, Result, StoreError};
use crate::models::{CreateOrderRequest, Order, OrderDto, UpdateOrderRequest};
use crate::repository::OrderRepository;

// == Order Service ==
/// Holds no state of its own beyond collaborator handles, so clones are
/// cheap and may be used from any number of tasks at once.
#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    cache: Arc<dyn CacheBackend>,
    codec: Arc<dyn PayloadCodec>,
    cache_ttl: Duration,
}

impl OrderService {
    // == Constructor ==
    /// Creates a service with the JSON codec and the default five minute TTL.
    pub fn new(repository: Arc<dyn OrderRepository>, cache: Arc<dyn CacheBackend>) -> Self {
        Self {
            repository,
            cache,
            codec: Arc::new(JsonCodec),
            cache_ttl: DEFAULT_ORDER_CACHE_TTL,
        }
    }

    pub fn with_codec(mut self, codec: Arc<dyn PayloadCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    // == Get ==
    /// Returns one order, from cache when possible.
    pub async fn get_order(&self, id: Uuid) -> Result<OrderDto> {
        let key = order_cache_key(id);

        if let Some(order) = self.read_cached(&key).await {
            debug!(order_id = %id, "Order served from cache");
            return Ok(order);
        }

        let Some(order) = self.repository.lookup(id).await? else {
            warn!(order_id = %id, "Order not found");
            return Err(OrderError::NotFound(id));
        };

        let dto = OrderDto::from(order);
        self.populate(&key, &dto).await;
        Ok(dto)
    }

    // == List ==
    /// Returns every order, newest first. Never cached.
    pub async fn list_orders(&self) -> Result<Vec<OrderDto>> {
        let orders = self.repository.list_all().await?;
        debug!(count = orders.len(), "Listed orders");
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    // == Create ==
    /// Persists a new order built from already-validated fields.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderDto> {
        let order = Order::new(request.customer_name, request.product, request.amount);
        let created = self.repository.insert(order).await?;

        info!(order_id = %created.id, customer = %created.customer_name, "Order created");
        Ok(OrderDto::from(created))
    }

    // == Update ==
    /// Replaces the mutable fields of an existing order, then invalidates its
    /// cache entry. The next read repopulates it.
    pub async fn update_order(&self, id: Uuid, request: UpdateOrderRequest) -> Result<OrderDto> {
        let Some(current) = self.repository.lookup(id).await? else {
            warn!(order_id = %id, "Attempted to update non-existent order");
            return Err(OrderError::NotFound(id));
        };

        let revised = current.revised(request.customer_name, request.product, request.amount);
        let updated = match self.repository.update(revised).await {
            Ok(updated) => updated,
            // Deleted between the lookup and the write
            Err(StoreError::Missing(missing)) => {
                warn!(order_id = %missing, "Order vanished before update");
                return Err(OrderError::NotFound(missing));
            }
            Err(err) => return Err(err.into()),
        };
        self.invalidate(&order_cache_key(id)).await;

        info!(order_id = %id, "Order updated");
        Ok(OrderDto::from(updated))
    }

    // == Delete ==
    /// Removes an order from the store, then from the cache.
    pub async fn delete_order(&self, id: Uuid) -> Result<bool> {
        if !self.repository.exists(id).await? {
            warn!(order_id = %id, "Attempted to delete non-existent order");
            return Err(OrderError::NotFound(id));
        }

        self.repository.delete(id).await?;
        self.invalidate(&order_cache_key(id)).await;

        info!(order_id = %id, "Order deleted");
        Ok(true)
    }

    // == Cache Helpers ==
    async fn read_cached(&self, key: &str) -> Option<OrderDto> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "Cache read failed, falling back to store");
                return None;
            }
        };

        match self.codec.decode(&bytes) {
            Ok(order) => Some(order),
            Err(err) => {
                warn!(key, error = %err, "Ignoring undecodable cache entry");
                None
            }
        }
    }

    async fn populate(&self, key: &str, order: &OrderDto) {
        let bytes = match self.codec.encode(order) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key, error = %err, "Skipping cache population");
                return;
            }
        };

        match self.cache.set(key, bytes, self.cache_ttl).await {
            Ok(()) => debug!(key, ttl_secs = self.cache_ttl.as_secs(), "Order cached"),
            Err(err) => warn!(key, error = %err, "Cache write failed"),
        }
    }

    async fn invalidate(&self, key: &str) {
        if let Err(err) = self.cache.delete(key).await {
            warn!(key, error = %err, "Cache invalidation failed, entry expires with its TTL");
        }
    }
}
