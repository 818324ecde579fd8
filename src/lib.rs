//! Orders Service - order records behind a cache-aside TTL cache
//!
//! The durable order store is the source of truth; a TTL cache in front of
//! it is populated on read and invalidated after mutations.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::OrderService;
pub use tasks::spawn_cleanup_task;
