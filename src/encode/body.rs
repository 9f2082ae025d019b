//! Body substitution
//!
//! Finds the body slot through the same shape match the request decoder
//! uses and swaps only that slot. Everything else in the payload, including
//! positions no shape describes, comes back unchanged.

use crate::error::{Error, Result};
use crate::shape::{join, to_pointer, Registry};
use crate::types::RawPayload;
use serde_json::Value;
use tracing::debug;

/// Replaces the body of compose request payloads
#[derive(Debug, Clone, Copy)]
pub struct BodyEncoder<'c> {
    registry: &'c Registry,
}

impl<'c> BodyEncoder<'c> {
    pub fn new(registry: &'c Registry) -> Self {
        Self { registry }
    }

    /// Return a copy of `raw` with its body replaced by `new_body`
    ///
    /// The input is left untouched.
    pub fn replace_body(&self, raw: &RawPayload, new_body: &str) -> Result<RawPayload> {
        let pointer = self.body_pointer(raw)?;
        let mut replaced = raw.clone();
        set_string(&mut replaced, &pointer, new_body)?;
        Ok(replaced)
    }

    /// Replace the body of an owned payload
    ///
    /// Only the body slot is rewritten; every other node is moved through
    /// as-is.
    pub fn replace_body_into(&self, mut raw: RawPayload, new_body: &str) -> Result<RawPayload> {
        let pointer = self.body_pointer(&raw)?;
        set_string(&mut raw, &pointer, new_body)?;
        Ok(raw)
    }

    /// JSON pointer of the body slot the request decoder would read
    pub fn body_pointer(&self, raw: &RawPayload) -> Result<String> {
        let matched = self.registry.match_shape(raw)?;
        if !matched.has_body() {
            return Err(Error::not_applicable(format!(
                "{matched} payloads have no body slot"
            )));
        }
        let found = self
            .registry
            .match_request(raw)
            .ok_or(Error::UnrecognizedFormat)?;

        let shape = found.shape;
        // The slot must hold a string already; anything else means the table
        // no longer fits this payload.
        found.message.required_str(shape.body, "body")?;

        let pointer = to_pointer(&join(&found.message.path, shape.body));
        debug!(version = shape.version, slot = ?found.slot, %pointer, "Located body slot");
        Ok(pointer)
    }
}

fn set_string(root: &mut Value, pointer: &str, value: &str) -> Result<()> {
    let slot = root
        .pointer_mut(pointer)
        .ok_or_else(|| Error::Other(format!("body slot {pointer} vanished during replacement")))?;
    *slot = Value::String(value.to_string());
    Ok(())
}
