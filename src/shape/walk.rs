//! Positional navigation over raw payloads
//!
//! The wire format is nested sequences addressed by index. A walk
//! distinguishes a slot that is simply not there (out of range or `null`)
//! from a walk that ran into a scalar where a sequence was expected.

use crate::error::{Error, Result};
use serde_json::Value;

/// Outcome of following a positional path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A non-null value sits at the path
    Found(&'a Value),
    /// The path ends past the end of a sequence, or at/through a `null`
    Missing,
    /// Step `depth` of the path tried to index into a non-sequence
    Malformed { depth: usize, found: &'static str },
}

impl<'a> Lookup<'a> {
    /// The found value, if any
    pub fn found(self) -> Option<&'a Value> {
        match self {
            Lookup::Found(v) => Some(v),
            _ => None,
        }
    }
}

/// Follow `path` from `root`
pub fn walk<'a>(root: &'a Value, path: &[usize]) -> Lookup<'a> {
    let mut current = root;
    for (depth, &index) in path.iter().enumerate() {
        current = match current {
            Value::Array(items) => match items.get(index) {
                Some(next) => next,
                None => return Lookup::Missing,
            },
            Value::Null => return Lookup::Missing,
            other => {
                return Lookup::Malformed {
                    depth,
                    found: kind_name(other),
                }
            }
        };
    }

    if current.is_null() {
        Lookup::Missing
    } else {
        Lookup::Found(current)
    }
}

/// Short name of a JSON value's type, for error messages
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "object",
    }
}

/// Render a positional path as an RFC 6901 JSON pointer
pub fn to_pointer(path: &[usize]) -> String {
    let mut out = String::new();
    for index in path {
        out.push('/');
        out.push_str(&index.to_string());
    }
    out
}

/// Concatenate two positional paths
pub fn join(base: &[usize], rel: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(base.len() + rel.len());
    out.extend_from_slice(base);
    out.extend_from_slice(rel);
    out
}

// ============================================================================
// Scope
// ============================================================================

/// A located sub-tree together with its absolute position in the payload
///
/// Field reads go through a scope so that errors carry the absolute pointer
/// and the version label of the shape that located the sub-tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope<'a> {
    pub value: &'a Value,
    pub path: Vec<usize>,
    pub version: &'static str,
}

impl<'a> Scope<'a> {
    pub fn new(value: &'a Value, path: Vec<usize>, version: &'static str) -> Self {
        Self {
            value,
            path,
            version,
        }
    }

    /// Follow a path relative to this scope
    pub fn lookup(&self, rel: &[usize]) -> Lookup<'a> {
        walk(self.value, rel)
    }

    /// Absolute pointer of a path relative to this scope
    pub fn pointer(&self, rel: &[usize]) -> String {
        to_pointer(&join(&self.path, rel))
    }

    /// Narrow to the non-null value at `rel`
    pub fn descend(&self, rel: &[usize]) -> Option<Scope<'a>> {
        self.lookup(rel)
            .found()
            .map(|value| Scope::new(value, join(&self.path, rel), self.version))
    }

    /// Whether a non-null value sits at `rel`
    pub fn is_present(&self, rel: &[usize]) -> bool {
        matches!(self.lookup(rel), Lookup::Found(_))
    }

    /// Read a string that may legitimately be absent
    pub fn optional_str(&self, rel: &[usize], field: &str) -> Result<Option<&'a str>> {
        match self.lookup(rel) {
            Lookup::Found(Value::String(s)) => Ok(Some(s.as_str())),
            Lookup::Found(other) => Err(Error::malformed(
                self.version,
                self.pointer(rel),
                format!("expected string for {field}, found {}", kind_name(other)),
            )),
            Lookup::Missing => Ok(None),
            Lookup::Malformed { depth, found } => Err(self.malformed_walk(rel, depth, found, field)),
        }
    }

    /// Read a string that must be present
    pub fn required_str(&self, rel: &[usize], field: &str) -> Result<&'a str> {
        self.optional_str(rel, field)?
            .ok_or_else(|| Error::missing_field(field, self.version))
    }

    /// Read a sequence of strings that must be present, preserving order
    pub fn required_str_list(&self, rel: &[usize], field: &str) -> Result<Vec<String>> {
        match self.lookup(rel) {
            Lookup::Found(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(Error::malformed(
                        self.version,
                        self.pointer(&join(rel, &[i])),
                        format!("expected string in {field}, found {}", kind_name(other)),
                    )),
                })
                .collect(),
            Lookup::Found(other) => Err(Error::malformed(
                self.version,
                self.pointer(rel),
                format!("expected sequence for {field}, found {}", kind_name(other)),
            )),
            Lookup::Missing => Err(Error::missing_field(field, self.version)),
            Lookup::Malformed { depth, found } => Err(self.malformed_walk(rel, depth, found, field)),
        }
    }

    fn malformed_walk(&self, rel: &[usize], depth: usize, found: &str, field: &str) -> Error {
        Error::malformed(
            self.version,
            self.pointer(&rel[..depth]),
            format!("expected sequence on the way to {field}, found {found}"),
        )
    }
}
