//! Common types used throughout the compose codec
//!
//! This module contains the decoded record types and the type aliases
//! shared by the shape, decode and encode modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Raw wire payload (re-exported from serde_json)
pub type RawPayload = serde_json::Value;

/// Opaque action flag carried by a compose payload (e.g. `^all`, `^pfg`)
///
/// The vocabulary is open. Tokens seen so far start with `^`, but the action
/// list is read as whatever strings the payload carries.
pub type ActionToken = String;

/// Prefix shared by every action token
pub const ACTION_TOKEN_PREFIX: char = '^';

/// Whether `s` is syntactically an action token
pub fn is_action_token(s: &str) -> bool {
    s.starts_with(ACTION_TOKEN_PREFIX)
}

// ============================================================================
// Lifecycle Type
// ============================================================================

/// Stage of the compose flow a payload represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComposeLifecycleType {
    /// First save of a brand new draft
    FirstDraftSave,
    /// Update of an already saved draft (reply or new compose)
    DraftSave,
    /// Dispatch of a message
    Send,
}

impl ComposeLifecycleType {
    /// Wire-style name (e.g. `FIRST_DRAFT_SAVE`)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstDraftSave => "FIRST_DRAFT_SAVE",
            Self::DraftSave => "DRAFT_SAVE",
            Self::Send => "SEND",
        }
    }
}

impl fmt::Display for ComposeLifecycleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Decoded Records
// ============================================================================

/// Semantic fields of a compose save/send request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedComposeRequest {
    pub thread_id: String,
    pub message_id: String,
    /// Absent on some update payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML fragment
    pub body: String,
    pub actions: Vec<ActionToken>,
    #[serde(rename = "type")]
    pub compose_type: ComposeLifecycleType,
}

/// Semantic fields of a compose save/send response
///
/// The backend does not echo content, so there is no subject or body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedComposeResponse {
    pub thread_id: String,
    pub message_id: String,
    pub actions: Vec<ActionToken>,
    #[serde(rename = "type")]
    pub compose_type: ComposeLifecycleType,
}

/// Result of decoding a payload whose direction was detected structurally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParsedCompose {
    Request(ParsedComposeRequest),
    Response(ParsedComposeResponse),
}

impl ParsedCompose {
    pub fn thread_id(&self) -> &str {
        match self {
            Self::Request(r) => &r.thread_id,
            Self::Response(r) => &r.thread_id,
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            Self::Request(r) => &r.message_id,
            Self::Response(r) => &r.message_id,
        }
    }

    pub fn compose_type(&self) -> ComposeLifecycleType {
        match self {
            Self::Request(r) => r.compose_type,
            Self::Response(r) => r.compose_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_action_token() {
        assert!(is_action_token("^all"));
        assert!(is_action_token("^io_imc3"));
        assert!(is_action_token("^some_future_token"));
        assert!(!is_action_token("all"));
        assert!(!is_action_token(""));
    }

    #[test]
    fn test_lifecycle_serialization() {
        assert_eq!(
            serde_json::to_value(ComposeLifecycleType::FirstDraftSave).unwrap(),
            json!("FIRST_DRAFT_SAVE")
        );
        assert_eq!(ComposeLifecycleType::Send.to_string(), "SEND");
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let parsed = ParsedComposeRequest {
            thread_id: "thread-a:r1".to_string(),
            message_id: "msg-a:r2".to_string(),
            subject: None,
            body: "<div>x</div>".to_string(),
            actions: vec!["^all".to_string()],
            compose_type: ComposeLifecycleType::DraftSave,
        };

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["threadId"], "thread-a:r1");
        assert_eq!(value["type"], "DRAFT_SAVE");
        assert!(value.get("subject").is_none());
    }

    #[test]
    fn test_parsed_compose_tagged() {
        let parsed = ParsedCompose::Response(ParsedComposeResponse {
            thread_id: "thread-f:1".to_string(),
            message_id: "msg-a:r2".to_string(),
            actions: vec![],
            compose_type: ComposeLifecycleType::Send,
        });

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["kind"], "response");
        assert_eq!(parsed.thread_id(), "thread-f:1");
        assert_eq!(parsed.compose_type(), ComposeLifecycleType::Send);
    }
}
