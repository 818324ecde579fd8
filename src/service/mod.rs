//! Order Service Module
//!
//! The cache-aside coordinator and the policy it applies: key derivation,
//! TTL, and payload encoding.

mod codec;
mod coordinator;
mod keys;

#[cfg(test)]
mod fakes;

pub use codec::{JsonCodec, PayloadCodec};
pub use coordinator::OrderService;
pub use keys::{order_cache_key, DEFAULT_ORDER_CACHE_TTL, ORDER_CACHE_NAMESPACE};
