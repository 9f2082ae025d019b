//! Decoder implementations
//!
//! Each decoder borrows a registry and a classifier; neither holds state
//! between calls.

use super::classify::{Classifier, StructuralMarkers};
use super::types::ComposeDecoder;
use crate::error::{Error, Result};
use crate::shape::{
    kind_name, Anchor, FieldPath, Lookup, Registry, RequestMatch, ResponseMatch, Scope,
};
use crate::types::{ParsedCompose, ParsedComposeRequest, ParsedComposeResponse, RawPayload};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Canonical thread id: `thread-<letter>:<id>`
static THREAD_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^thread-[a-z]:\S+$").unwrap());

// ============================================================================
// Request Decoder
// ============================================================================

/// Decodes compose save/send requests
#[derive(Debug, Clone, Copy)]
pub struct RequestDecoder<'c> {
    registry: &'c Registry,
    classifier: &'c Classifier,
}

impl<'c> RequestDecoder<'c> {
    pub fn new(registry: &'c Registry, classifier: &'c Classifier) -> Self {
        Self {
            registry,
            classifier,
        }
    }
}

impl ComposeDecoder for RequestDecoder<'_> {
    type Output = ParsedComposeRequest;

    fn decode(&self, raw: &RawPayload) -> Result<ParsedComposeRequest> {
        let Some(found) = self.registry.match_request(raw) else {
            debug!("No request shape matched compose payload");
            return Err(Error::UnrecognizedFormat);
        };
        decode_matched_request(&found, self.classifier).inspect_err(log_drift)
    }
}

/// Extract a request record from an already located shape
pub(crate) fn decode_matched_request(
    found: &RequestMatch<'_>,
    classifier: &Classifier,
) -> Result<ParsedComposeRequest> {
    let shape = found.shape;
    let message = &found.message;

    let thread_id = resolve_thread_id(shape.thread_id, &found.thread, message)?;
    let message_id = message.required_str(shape.message_id, "messageId")?;
    let subject = message.optional_str(shape.subject, "subject")?;
    let body = message.required_str(shape.body, "body")?;
    let actions = message.required_str_list(shape.actions, "actions")?;

    let markers = StructuralMarkers {
        existing_draft: found.thread.is_present(shape.existing_draft),
        prior_identity: message.is_present(shape.prior_identity),
    };
    let compose_type = classifier.classify(&actions, markers);

    debug!(
        version = shape.version,
        slot = ?found.slot,
        ?markers,
        %compose_type,
        "Decoded compose request"
    );

    Ok(ParsedComposeRequest {
        thread_id,
        message_id: message_id.to_string(),
        subject: subject.map(str::to_string),
        body: body.to_string(),
        actions,
        compose_type,
    })
}

// ============================================================================
// Response Decoder
// ============================================================================

/// Decodes compose save/send responses
#[derive(Debug, Clone, Copy)]
pub struct ResponseDecoder<'c> {
    registry: &'c Registry,
    classifier: &'c Classifier,
}

impl<'c> ResponseDecoder<'c> {
    pub fn new(registry: &'c Registry, classifier: &'c Classifier) -> Self {
        Self {
            registry,
            classifier,
        }
    }
}

impl ComposeDecoder for ResponseDecoder<'_> {
    type Output = ParsedComposeResponse;

    fn decode(&self, raw: &RawPayload) -> Result<ParsedComposeResponse> {
        let Some(found) = self.registry.match_response(raw) else {
            debug!("No response shape matched compose payload");
            return Err(Error::UnrecognizedFormat);
        };
        decode_matched_response(&found, self.classifier).inspect_err(log_drift)
    }
}

/// Extract a response record from an already located shape
///
/// A response always describes a message the backend has stored, so it is
/// never a first save.
pub(crate) fn decode_matched_response(
    found: &ResponseMatch<'_>,
    classifier: &Classifier,
) -> Result<ParsedComposeResponse> {
    let shape = found.shape;
    let message = &found.message;

    let thread_id = resolve_thread_id(shape.thread_id, &found.thread, message)?;
    let message_id = message.required_str(shape.message_id, "messageId")?;
    let actions = message.required_str_list(shape.actions, "actions")?;
    let compose_type = classifier.classify(&actions, StructuralMarkers::STORED);

    debug!(version = shape.version, %compose_type, "Decoded compose response");

    Ok(ParsedComposeResponse {
        thread_id,
        message_id: message_id.to_string(),
        actions,
        compose_type,
    })
}

// ============================================================================
// Auto-detecting Decoder
// ============================================================================

/// Decodes either direction, trying request shapes first
#[derive(Debug, Clone, Copy)]
pub struct PayloadDecoder<'c> {
    registry: &'c Registry,
    classifier: &'c Classifier,
}

impl<'c> PayloadDecoder<'c> {
    pub fn new(registry: &'c Registry, classifier: &'c Classifier) -> Self {
        Self {
            registry,
            classifier,
        }
    }
}

impl ComposeDecoder for PayloadDecoder<'_> {
    type Output = ParsedCompose;

    fn decode(&self, raw: &RawPayload) -> Result<ParsedCompose> {
        let decoded = if let Some(found) = self.registry.match_request(raw) {
            decode_matched_request(&found, self.classifier).map(ParsedCompose::Request)
        } else if let Some(found) = self.registry.match_response(raw) {
            decode_matched_response(&found, self.classifier).map(ParsedCompose::Response)
        } else {
            debug!("No registered shape matched compose payload");
            return Err(Error::UnrecognizedFormat);
        };
        decoded.inspect_err(log_drift)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Resolve the thread id from an ordered list of candidate locations
///
/// The first canonical id wins. When only non-canonical strings are found
/// the first of them is returned unchanged.
fn resolve_thread_id(
    candidates: &[FieldPath],
    thread: &Scope<'_>,
    message: &Scope<'_>,
) -> Result<String> {
    let mut fallback: Option<&str> = None;

    for candidate in candidates {
        let scope = match candidate.anchor {
            Anchor::Thread => thread,
            Anchor::Message => message,
        };
        match scope.lookup(candidate.path) {
            Lookup::Found(Value::String(id)) if THREAD_ID_REGEX.is_match(id) => {
                return Ok(id.clone());
            }
            Lookup::Found(Value::String(id)) => {
                fallback.get_or_insert(id.as_str());
            }
            Lookup::Found(other) => {
                return Err(Error::malformed(
                    scope.version,
                    scope.pointer(candidate.path),
                    format!("expected string for threadId, found {}", kind_name(other)),
                ));
            }
            Lookup::Missing | Lookup::Malformed { .. } => {}
        }
    }

    match fallback {
        Some(id) => {
            debug!(thread_id = id, "Using non-canonical thread id");
            Ok(id.to_string())
        }
        None => Err(Error::missing_field("threadId", thread.version)),
    }
}

/// Shape drift is logged here; unrecognized payloads are the caller's call
fn log_drift(err: &Error) {
    if err.is_shape_drift() {
        warn!(error = %err, "Compose payload does not fit its matched shape");
    }
}
