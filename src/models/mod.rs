//! Order entity plus request and response models for the orders API

pub mod order;
pub mod requests;
pub mod responses;

pub use order::{Order, OrderDto};
pub use requests::{CreateOrderRequest, UpdateOrderRequest};
pub use responses::{ApiResponse, HealthResponse, StatsResponse};
