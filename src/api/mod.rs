//! API Module
//!
//! HTTP handlers and routing for the orders REST API.
//!
//! # Endpoints
//! - `GET /api/orders` - List orders
//! - `POST /api/orders` - Create an order
//! - `GET /api/orders/:id` - Fetch an order
//! - `PUT /api/orders/:id` - Update an order
//! - `DELETE /api/orders/:id` - Delete an order
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{OrderId, OrderJson};
pub use handlers::*;
pub use routes::create_router;
