//! Error types for the orders service
//!
//! `OrderError` is the only error a caller of the order service ever sees.
//! Cache and codec failures carry their own types and are absorbed by the
//! service before they can reach a caller.

use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::models::ApiResponse;

/// Validation messages grouped by the offending field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

// == Error Kind ==
/// Coarse classification of an [`OrderError`], used by transport adapters
/// to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Store,
}

// == Store Error ==
/// Failures raised by a durable order store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Insert of an identifier that is already stored
    #[error("Order {0} already exists")]
    Duplicate(Uuid),

    /// Update of an identifier that is not stored
    #[error("Order {0} does not exist")]
    Missing(Uuid),

    /// Backing file could not be read or written
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file contents could not be parsed
    #[error("Storage data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Store rejected the operation or is unreachable
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error ==
/// Failures raised by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Key exceeds maximum length of {max} bytes")]
    KeyTooLong { max: usize },

    #[error("Value exceeds maximum size of {max} bytes")]
    ValueTooLarge { max: usize },

    #[error("Cache full: {0}")]
    Full(String),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Codec Error ==
/// A cache payload could not be encoded or decoded.
#[derive(Error, Debug)]
#[error("Payload codec failed: {0}")]
pub struct CodecError(#[from] serde_json::Error);

// == Order Error ==
/// Unified error type for order operations.
#[derive(Error, Debug)]
pub enum OrderError {
    /// Requested order is absent from the durable store
    #[error("Order with ID {0} not found")]
    NotFound(Uuid),

    /// Input fields were rejected before reaching the service
    #[error("{message}")]
    Validation { message: String, errors: FieldErrors },

    /// Durable store failed; aborts the current operation
    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

impl OrderError {
    /// Builds a validation failure from per-field messages.
    pub fn validation(errors: FieldErrors) -> Self {
        OrderError::Validation {
            message: "Validation failed".to_string(),
            errors,
        }
    }

    /// Validation failure carrying a single message for `field`.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        Self::validation(errors)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::Validation { .. } => ErrorKind::Validation,
            OrderError::Store(_) => ErrorKind::Store,
        }
    }
}

// == Extractor Rejections ==
/// A body that is not JSON, or not the expected shape, is a `body` field error.
impl From<JsonRejection> for OrderError {
    fn from(rejection: JsonRejection) -> Self {
        OrderError::invalid_field("body", rejection.body_text())
    }
}

/// A path segment that does not parse as an order id is an `id` field error.
impl From<PathRejection> for OrderError {
    fn from(rejection: PathRejection) -> Self {
        OrderError::invalid_field("id", rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match self {
            OrderError::Validation { message, errors } => {
                ApiResponse::<()>::failure_with_errors(message, errors)
            }
            not_found @ OrderError::NotFound(_) => ApiResponse::failure(not_found.to_string()),
            other => {
                // Store details stay in the logs
                error!(error = %other, "Order request failed");
                ApiResponse::failure("An internal server error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for order operations.
pub type Result<T> = std::result::Result<T, OrderError>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type CacheResult<T> = std::result::Result<T, CacheError>;
