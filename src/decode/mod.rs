//! Compose payload decoder module
//!
//! # Overview
//!
//! The decode module turns a raw payload into a typed record. The registry
//! picks the shape; the decoder walks it and the classifier derives the
//! lifecycle type. A required field missing from a matched shape is an
//! error, never an empty value.

mod classify;
mod decoders;
mod types;

pub use classify::{classify, Classifier, StructuralMarkers, SEND_ACTIONS};
pub use decoders::{PayloadDecoder, RequestDecoder, ResponseDecoder};
pub use types::ComposeDecoder;
