//! Compose payload encoder module
//!
//! # Overview
//!
//! Re-encodes a request payload with a substituted body. The result is
//! meant to be serialized and sent in place of the original; it is not
//! re-validated here, but decoding it yields the new body and otherwise the
//! same record as the input.

mod body;

pub use body::BodyEncoder;
