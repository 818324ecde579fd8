//! API Routes
//!
//! Configures the Axum router with all orders service endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_order_handler, delete_order_handler, get_order_handler, health_handler,
    list_orders_handler, stats_handler, update_order_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/orders` - List orders, newest first
/// - `POST /api/orders` - Create an order
/// - `GET /api/orders/:id` - Fetch one order
/// - `PUT /api/orders/:id` - Replace an order's fields
/// - `DELETE /api/orders/:id` - Delete an order
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/orders",
            get(list_orders_handler).post(create_order_handler),
        )
        .route(
            "/api/orders/:id",
            get(get_order_handler)
                .put(update_order_handler)
                .delete(delete_order_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
