//! Cache key and TTL policy for orders.

use std::time::Duration;

use uuid::Uuid;

/// Namespace separating order keys from other entity types in a shared cache
pub const ORDER_CACHE_NAMESPACE: &str = "order";

/// How long a cached order stays valid when no other TTL is configured
pub const DEFAULT_ORDER_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for the order with identifier `id`.
pub fn order_cache_key(id: Uuid) -> String {
    format!("{}:{}", ORDER_CACHE_NAMESPACE, id)
}
