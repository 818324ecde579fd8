//! Cache payload codec.
//!
//! The cache only sees bytes; the order service owns the conversion.

use crate::error::CodecError;
use crate::models::OrderDto;

/// Converts cached order projections to and from bytes.
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, order: &OrderDto) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<OrderDto, CodecError>;
}

/// JSON encoding via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl PayloadCodec for JsonCodec {
    fn encode(&self, order: &OrderDto) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(order)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<OrderDto, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
