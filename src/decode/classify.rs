//! Lifecycle classification
//!
//! The wire format has no type field. The stage is inferred from the action
//! tokens and two structural markers, in this precedence:
//!
//! 1. any send-signaling token → [`ComposeLifecycleType::Send`]
//! 2. neither marker present → [`ComposeLifecycleType::FirstDraftSave`]
//! 3. otherwise → [`ComposeLifecycleType::DraftSave`]
//!
//! A send request may still carry the structure of the draft it was
//! composed in, so tokens are checked before markers.

use crate::types::{ActionToken, ComposeLifecycleType};
use std::collections::BTreeSet;

/// Tokens that signal outbound dispatch
pub const SEND_ACTIONS: &[&str] = &["^pfg", "^f_bt", "^i", "^u"];

/// Structural evidence that a draft was saved before
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralMarkers {
    /// The thread entry carries the slot used to update a stored draft
    pub existing_draft: bool,
    /// The message record names the draft revision it replaces
    pub prior_identity: bool,
}

impl StructuralMarkers {
    /// Markers of a message the backend has already stored
    pub const STORED: Self = Self {
        existing_draft: true,
        prior_identity: true,
    };

    /// True when nothing indicates an earlier save
    pub fn is_first_save(self) -> bool {
        !self.existing_draft && !self.prior_identity
    }
}

/// Three-way lifecycle classifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    send_actions: BTreeSet<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            send_actions: SEND_ACTIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Classifier {
    /// Create a classifier with the built-in send tokens
    pub fn new() -> Self {
        Self::default()
    }

    /// Add tokens to the send subset
    #[must_use]
    pub fn with_send_actions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send_actions.extend(extra.into_iter().map(Into::into));
        self
    }

    /// The send subset, sorted
    pub fn send_actions(&self) -> impl Iterator<Item = &str> {
        self.send_actions.iter().map(String::as_str)
    }

    pub fn is_send_action(&self, token: &str) -> bool {
        self.send_actions.contains(token)
    }

    /// Classify a payload from its actions and structural markers
    pub fn classify(
        &self,
        actions: &[ActionToken],
        markers: StructuralMarkers,
    ) -> ComposeLifecycleType {
        classify_with(|t| self.is_send_action(t), actions, markers)
    }
}

/// Classify with the built-in send tokens
pub fn classify(actions: &[ActionToken], markers: StructuralMarkers) -> ComposeLifecycleType {
    classify_with(|t| SEND_ACTIONS.contains(&t), actions, markers)
}

fn classify_with(
    is_send: impl Fn(&str) -> bool,
    actions: &[ActionToken],
    markers: StructuralMarkers,
) -> ComposeLifecycleType {
    if actions.iter().any(|a| is_send(a.as_str())) {
        ComposeLifecycleType::Send
    } else if markers.is_first_save() {
        ComposeLifecycleType::FirstDraftSave
    } else {
        ComposeLifecycleType::DraftSave
    }
}
