//! API Handlers
//!
//! HTTP request handlers for the orders endpoints. Handlers validate input,
//! call the order service and wrap results in the response envelope.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::extract::{OrderId, OrderJson};
use crate::cache::MemoryCache;
use crate::config::Config;
use crate::error::{Result, StoreResult};
use crate::models::{
    ApiResponse, CreateOrderRequest, HealthResponse, OrderDto, StatsResponse, UpdateOrderRequest,
};
use crate::repository::{FileOrderRepository, MemoryOrderRepository, OrderRepository};
use crate::service::OrderService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    /// The cache behind `orders`, kept for stats and the cleanup task
    pub cache: MemoryCache,
}

impl AppState {
    /// Wires an order service over `repository` and `cache`.
    pub fn new(repository: Arc<dyn OrderRepository>, cache: MemoryCache) -> Self {
        let orders = OrderService::new(repository, Arc::new(cache.clone()));
        Self { orders, cache }
    }

    /// In-memory store and cache with default settings.
    pub fn in_memory() -> Self {
        let config = Config::default();
        Self::new(
            Arc::new(MemoryOrderRepository::new()),
            MemoryCache::new(config.cache_max_entries),
        )
    }

    /// Builds state from configuration, opening the data file if one is set.
    pub async fn from_config(config: &Config) -> StoreResult<Self> {
        let repository: Arc<dyn OrderRepository> = match &config.data_file {
            Some(path) => Arc::new(FileOrderRepository::open(path).await?),
            None => Arc::new(MemoryOrderRepository::new()),
        };

        let mut state = Self::new(repository, MemoryCache::new(config.cache_max_entries));
        state.orders = state.orders.with_cache_ttl(config.cache_ttl());
        Ok(state)
    }
}

/// Handler for GET /api/orders/:id
pub async fn get_order_handler(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<ApiResponse<OrderDto>>> {
    info!(order_id = %id, "Getting order");
    let order = state.orders.get_order(id).await?;

    Ok(Json(ApiResponse::success(order, "Order retrieved successfully")))
}

/// Handler for GET /api/orders
pub async fn list_orders_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OrderDto>>>> {
    let orders = state.orders.list_orders().await?;

    Ok(Json(ApiResponse::success(orders, "Orders retrieved successfully")))
}

/// Handler for POST /api/orders
///
/// Answers 201 with a `Location` header pointing at the new order.
pub async fn create_order_handler(
    State(state): State<AppState>,
    OrderJson(req): OrderJson<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    info!(customer = %req.customer_name, "Creating order");
    req.validate()?;

    let order = state.orders.create_order(req).await?;
    let location = format!("/api/orders/{}", order.order_id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ApiResponse::success(order, "Order created successfully")),
    ))
}

/// Handler for PUT /api/orders/:id
pub async fn update_order_handler(
    State(state): State<AppState>,
    OrderId(id): OrderId,
    OrderJson(req): OrderJson<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderDto>>> {
    info!(order_id = %id, "Updating order");
    req.validate()?;

    let order = state.orders.update_order(id, req).await?;

    Ok(Json(ApiResponse::success(order, "Order updated successfully")))
}

/// Handler for DELETE /api/orders/:id
pub async fn delete_order_handler(
    State(state): State<AppState>,
    OrderId(id): OrderId,
) -> Result<Json<ApiResponse<bool>>> {
    info!(order_id = %id, "Deleting order");
    let deleted = state.orders.delete_order(id).await?;

    Ok(Json(ApiResponse::success(deleted, "Order deleted successfully")))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
