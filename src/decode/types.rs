//! Decoder types and traits
//!
//! Defines the core decoder abstraction.

use crate::error::Result;
use crate::types::RawPayload;

/// Trait for decoding a raw compose payload into a typed record
pub trait ComposeDecoder: Send + Sync {
    /// Record produced on success
    type Output;

    /// Decode the payload
    fn decode(&self, raw: &RawPayload) -> Result<Self::Output>;
}
