// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Compose Codec
//!
//! Decoder and body re-encoder for the payloads a webmail client exchanges
//! with its backend's internal compose save/send endpoint.
//!
//! The wire format is a schema-less tree of nested sequences whose field
//! positions shift between backend revisions. Each observed revision is
//! described by a versioned shape; payloads are matched to a shape by
//! structure, decoded into typed records, and classified into a lifecycle
//! stage (first draft save, draft save, send).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use compose_codec::{parse_compose_request, replace_body, ComposeLifecycleType};
//!
//! let raw: serde_json::Value = serde_json::from_str(&captured_request_text)?;
//! let parsed = parse_compose_request(&raw)?;
//!
//! if parsed.compose_type == ComposeLifecycleType::Send {
//!     let rewritten = replace_body(&raw, "<div>tracked</div>")?;
//!     forward(serde_json::to_string(&rewritten)?);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Codec (immutable)                      │
//! │ parse_compose_request  parse_compose_response  replace_body  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌────────────────────┬────────┴───────────┬────────────────────┐
//! │   Shape Registry   │      Decoder       │      Encoder       │
//! ├────────────────────┼────────────────────┼────────────────────┤
//! │ 2024-03-12         │ field extraction   │ body slot lookup   │
//! │ 2022-09-09         │ lifecycle classify │ single-slot swap   │
//! └────────────────────┴────────────────────┴────────────────────┘
//! ```
//!
//! Every operation is a pure function of its input; nothing is cached or
//! mutated between calls.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the codec
pub mod error;

/// Decoded record types and aliases
pub mod types;

/// Versioned shape descriptors and structural matching
pub mod shape;

/// Payload decoders and lifecycle classification
pub mod decode;

/// Body substitution
pub mod encode;

/// Codec configuration
pub mod config;

/// Codec facade
pub mod codec;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{Error, Result};
pub use shape::{Shape, ShapeKind};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Default-codec entry points
// ============================================================================

/// Identify the shape of a payload with the built-in tables
pub fn match_shape(raw: &RawPayload) -> Result<Shape> {
    codec::DEFAULT_CODEC.match_shape(raw)
}

/// Decode a compose request with the built-in tables
pub fn parse_compose_request(raw: &RawPayload) -> Result<ParsedComposeRequest> {
    codec::DEFAULT_CODEC.parse_compose_request(raw)
}

/// Decode a compose response with the built-in tables
pub fn parse_compose_response(raw: &RawPayload) -> Result<ParsedComposeResponse> {
    codec::DEFAULT_CODEC.parse_compose_response(raw)
}

/// Replace the body of a compose request with the built-in tables
pub fn replace_body(raw: &RawPayload, new_body: &str) -> Result<RawPayload> {
    codec::DEFAULT_CODEC.replace_body(raw, new_body)
}
