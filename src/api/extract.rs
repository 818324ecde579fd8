//! Request Extractors
//!
//! Wrappers over axum's `Json` and `Path` extractors whose rejections are
//! [`OrderError`] validation failures, so malformed input still answers
//! 400 inside the response envelope.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::OrderError;

/// JSON request body.
#[derive(Debug, Clone)]
pub struct OrderJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for OrderJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = OrderError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Order id taken from the `:id` path segment.
#[derive(Debug, Clone, Copy)]
pub struct OrderId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for OrderId
where
    S: Send + Sync,
{
    type Rejection = OrderError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}
