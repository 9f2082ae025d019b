//! Built-in shapes and the registry that matches them
//!
//! Each backend revision gets its own entry. Entries are never edited once
//! added, so archived payloads keep decoding; a new revision means a new
//! static plus a line in the tables at the bottom, newest first.

use super::types::{
    FieldPath, MessageSlot, RequestMatch, RequestShape, ResponseMatch, ResponseShape, Shape,
    SlotKind,
};
use crate::error::{Error, Result};
use serde_json::Value;
use tracing::debug;

// ============================================================================
// 2024-03-12
// ============================================================================
//
// Synthetic revision: this layout was not captured from the backend. It
// models a successor to 2022-09-09 for the multi-revision registry.
//
// Message records are wrapped as `[record, client_meta]` and the action
// list moved one position right, after a format flag at index 10.

pub static REQUEST_2024_03_12: RequestShape = RequestShape {
    version: "2024-03-12",
    thread: &[1, 0, 0],
    slots: &[
        MessageSlot {
            kind: SlotKind::Send,
            path: &[1, 13, 0, 0],
        },
        MessageSlot {
            kind: SlotKind::Update,
            path: &[1, 1, 0, 0],
        },
        MessageSlot {
            kind: SlotKind::Create,
            path: &[1, 2, 0, 4, 0, 0],
        },
    ],
    thread_id: &[FieldPath::thread(&[0]), FieldPath::message(&[13])],
    message_id: &[0],
    subject: &[7],
    body: &[8, 1, 0, 1],
    actions: &[11],
    existing_draft: &[1, 1],
    prior_identity: &[12, 0],
};

pub static RESPONSE_2024_03_12: ResponseShape = ResponseShape {
    version: "2024-03-12",
    thread: &[2, 0],
    message: &[1, 0, 0],
    thread_id: &[FieldPath::thread(&[0])],
    message_id: &[0],
    actions: &[5],
};

// ============================================================================
// 2022-09-09
// ============================================================================

pub static REQUEST_2022_09_09: RequestShape = RequestShape {
    version: "2022-09-09",
    thread: &[1, 0, 0],
    slots: &[
        MessageSlot {
            kind: SlotKind::Send,
            path: &[1, 13, 0],
        },
        MessageSlot {
            kind: SlotKind::Update,
            path: &[1, 1, 0],
        },
        MessageSlot {
            kind: SlotKind::Create,
            path: &[1, 2, 0, 4, 0],
        },
    ],
    // Sends started from a custom thread carry a client id in the thread
    // slot; the canonical id is echoed in the message record.
    thread_id: &[FieldPath::thread(&[0]), FieldPath::message(&[12])],
    message_id: &[0],
    subject: &[7],
    body: &[8, 1, 0, 1],
    actions: &[10],
    existing_draft: &[1, 1],
    prior_identity: &[11, 0],
};

pub static RESPONSE_2022_09_09: ResponseShape = ResponseShape {
    version: "2022-09-09",
    thread: &[2, 0],
    message: &[1, 0],
    thread_id: &[FieldPath::thread(&[0])],
    message_id: &[0],
    actions: &[4],
};

/// Request shapes, newest first
pub static REQUEST_SHAPES: [&RequestShape; 2] = [&REQUEST_2024_03_12, &REQUEST_2022_09_09];

/// Response shapes, newest first
pub static RESPONSE_SHAPES: [&ResponseShape; 2] = [&RESPONSE_2024_03_12, &RESPONSE_2022_09_09];

/// Every version label known to the built-in tables
pub fn builtin_versions() -> Vec<&'static str> {
    let mut versions: Vec<&'static str> = REQUEST_SHAPES
        .iter()
        .map(|s| s.version)
        .chain(RESPONSE_SHAPES.iter().map(|s| s.version))
        .collect();
    versions.sort_unstable_by(|a, b| b.cmp(a));
    versions.dedup();
    versions
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered set of enabled shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    requests: Vec<&'static RequestShape>,
    responses: Vec<&'static ResponseShape>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// All built-in shapes
    pub fn builtin() -> Self {
        Self {
            requests: REQUEST_SHAPES.to_vec(),
            responses: RESPONSE_SHAPES.to_vec(),
        }
    }

    /// Built-in shapes minus the given version labels
    pub fn without_versions<S: AsRef<str>>(disabled: &[S]) -> Self {
        let enabled = |version: &str| !disabled.iter().any(|d| d.as_ref() == version);
        Self {
            requests: REQUEST_SHAPES
                .iter()
                .copied()
                .filter(|s| enabled(s.version))
                .collect(),
            responses: RESPONSE_SHAPES
                .iter()
                .copied()
                .filter(|s| enabled(s.version))
                .collect(),
        }
    }

    pub fn request_shapes(&self) -> &[&'static RequestShape] {
        &self.requests
    }

    pub fn response_shapes(&self) -> &[&'static ResponseShape] {
        &self.responses
    }

    /// Whether a shape is enabled in this registry
    pub fn contains(&self, shape: Shape) -> bool {
        match shape {
            Shape::Request(s) => self.requests.iter().any(|r| std::ptr::eq(*r, s)),
            Shape::Response(s) => self.responses.iter().any(|r| std::ptr::eq(*r, s)),
        }
    }

    /// First request shape that structurally matches
    pub fn match_request<'a>(&self, raw: &'a Value) -> Option<RequestMatch<'a>> {
        self.requests.iter().find_map(|&shape| shape.locate(raw))
    }

    /// First response shape that structurally matches
    pub fn match_response<'a>(&self, raw: &'a Value) -> Option<ResponseMatch<'a>> {
        self.responses.iter().find_map(|&shape| shape.locate(raw))
    }

    /// Find the shape of a payload; requests are tried before responses
    pub fn match_shape(&self, raw: &Value) -> Result<Shape> {
        if let Some(found) = self.match_request(raw) {
            debug!(version = found.shape.version, slot = ?found.slot, "Matched request shape");
            return Ok(Shape::Request(found.shape));
        }
        if let Some(found) = self.match_response(raw) {
            debug!(version = found.shape.version, "Matched response shape");
            return Ok(Shape::Response(found.shape));
        }
        debug!("No registered shape matched compose payload");
        Err(Error::UnrecognizedFormat)
    }
}
