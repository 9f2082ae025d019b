//! Shape registry
//!
//! The wire format carries no version field. Each observed backend revision
//! is described by a [`RequestShape`] or [`ResponseShape`], and a payload is
//! assigned to a revision by structure alone.
//!
//! # Overview
//!
//! - [`Registry`] - ordered set of enabled shapes, newest first
//! - [`Shape`] - a matched shape plus its version label
//! - [`walk`] - positional navigation that tells *missing* from *malformed*

mod registry;
mod types;
mod walk;

pub use registry::{
    builtin_versions, Registry, REQUEST_2022_09_09, REQUEST_2024_03_12, REQUEST_SHAPES,
    RESPONSE_2022_09_09, RESPONSE_2024_03_12, RESPONSE_SHAPES,
};
pub use types::{
    Anchor, FieldPath, MessageSlot, Path, RequestMatch, RequestShape, ResponseMatch,
    ResponseShape, Shape, ShapeKind, SlotKind,
};
pub use walk::{join, kind_name, to_pointer, walk, Lookup, Scope};

#[cfg(test)]
mod tests;
