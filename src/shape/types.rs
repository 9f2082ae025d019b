//! Shape descriptors
//!
//! A shape records where one backend revision keeps each semantic field.
//! Paths are sequences of indices; every path is fixed and finite.

use super::walk::{walk, Lookup, Scope};
use crate::types::is_action_token;
use serde_json::Value;
use std::fmt;

/// Positional path into a payload
pub type Path = &'static [usize];

/// What a [`FieldPath`] is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The thread entry
    Thread,
    /// The message record
    Message,
}

/// A path anchored at the thread entry or at the message record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath {
    pub anchor: Anchor,
    pub path: Path,
}

impl FieldPath {
    pub const fn thread(path: Path) -> Self {
        Self {
            anchor: Anchor::Thread,
            path,
        }
    }

    pub const fn message(path: Path) -> Self {
        Self {
            anchor: Anchor::Message,
            path,
        }
    }
}

/// Which operation slot of a thread entry carried the message record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Send,
    Update,
    Create,
}

/// Location of a message record inside a thread entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSlot {
    pub kind: SlotKind,
    /// Relative to the thread entry
    pub path: Path,
}

// ============================================================================
// Request Shape
// ============================================================================

/// Field table of one request format revision
#[derive(Debug, PartialEq, Eq)]
pub struct RequestShape {
    /// Revision label, a date string
    pub version: &'static str,
    /// Thread entry, from the payload root
    pub thread: Path,
    /// Candidate message slots, tried in order
    pub slots: &'static [MessageSlot],
    /// Thread id candidates, tried in order
    pub thread_id: &'static [FieldPath],
    /// Message-relative
    pub message_id: Path,
    /// Message-relative
    pub subject: Path,
    /// Message-relative
    pub body: Path,
    /// Message-relative
    pub actions: Path,
    /// Thread-relative slot that only exists once the draft was saved before
    pub existing_draft: Path,
    /// Message-relative identity of the draft revision being replaced
    pub prior_identity: Path,
}

/// A request shape located inside a concrete payload
#[derive(Debug, Clone, PartialEq)]
pub struct RequestMatch<'a> {
    pub shape: &'static RequestShape,
    pub slot: SlotKind,
    pub thread: Scope<'a>,
    pub message: Scope<'a>,
}

impl RequestShape {
    /// Structurally locate this shape in `raw`
    ///
    /// Matches when one of the message slots holds a record whose actions
    /// path is a sequence of strings with at least one action token.
    pub fn locate<'a>(&'static self, raw: &'a Value) -> Option<RequestMatch<'a>> {
        let thread = walk(raw, self.thread).found().filter(|v| v.is_array())?;
        let thread = Scope::new(thread, self.thread.to_vec(), self.version);

        self.slots.iter().find_map(|slot| {
            let message = thread.descend(slot.path)?;
            is_action_list(message.lookup(self.actions)).then(|| RequestMatch {
                shape: self,
                slot: slot.kind,
                thread: thread.clone(),
                message,
            })
        })
    }
}

// ============================================================================
// Response Shape
// ============================================================================

/// Field table of one response format revision
#[derive(Debug, PartialEq, Eq)]
pub struct ResponseShape {
    pub version: &'static str,
    /// Thread result, from the payload root
    pub thread: Path,
    /// Saved message record, relative to the thread result
    pub message: Path,
    pub thread_id: &'static [FieldPath],
    /// Message-relative
    pub message_id: Path,
    /// Message-relative
    pub actions: Path,
}

/// A response shape located inside a concrete payload
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMatch<'a> {
    pub shape: &'static ResponseShape,
    pub thread: Scope<'a>,
    pub message: Scope<'a>,
}

impl ResponseShape {
    /// Structurally locate this shape in `raw`
    pub fn locate<'a>(&'static self, raw: &'a Value) -> Option<ResponseMatch<'a>> {
        let thread = walk(raw, self.thread).found().filter(|v| v.is_array())?;
        let thread = Scope::new(thread, self.thread.to_vec(), self.version);
        let message = thread.descend(self.message)?;

        is_action_list(message.lookup(self.actions)).then(|| ResponseMatch {
            shape: self,
            thread,
            message,
        })
    }
}

/// Whether a lookup landed on a sequence of strings holding at least one
/// action token
///
/// Strings without the token prefix are accepted alongside tokens.
fn is_action_list(lookup: Lookup<'_>) -> bool {
    match lookup {
        Lookup::Found(Value::Array(items)) => {
            items.iter().all(Value::is_string)
                && items
                    .iter()
                    .any(|item| item.as_str().is_some_and(is_action_token))
        }
        _ => false,
    }
}

// ============================================================================
// Shape
// ============================================================================

/// Direction of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Request,
    Response,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Request => f.write_str("request"),
            ShapeKind::Response => f.write_str("response"),
        }
    }
}

/// A registered shape, keyed by direction and version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Request(&'static RequestShape),
    Response(&'static ResponseShape),
}

impl Shape {
    /// Version label, for diagnostics
    pub fn version(&self) -> &'static str {
        match self {
            Shape::Request(s) => s.version,
            Shape::Response(s) => s.version,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Request(_) => ShapeKind::Request,
            Shape::Response(_) => ShapeKind::Response,
        }
    }

    /// Whether this shape declares a body slot
    pub fn has_body(&self) -> bool {
        matches!(self, Shape::Request(_))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.version())
    }
}
