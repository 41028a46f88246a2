//! Conversation domain types.
//!
//! These are the value objects that travel to the inference service:
//! chat transcript → augmenter → invoker → `conversation` field of the request.

use serde::{Deserialize, Serialize};

/// Username reserved for the synthetic instruction message.
pub const SYSTEM_USERNAME: &str = "system";

/// A single message in a conversation.
///
/// Serializes as `{"username": ..., "text": ...}`, which is exactly the wire
/// shape the inference service expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Display label of the speaker. Arbitrary Unicode.
    pub username: String,

    /// Message body. May be empty.
    pub text: String,
}

impl ConversationMessage {
    /// Create a message from a speaker.
    pub fn new(username: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            text: text.into(),
        }
    }

    /// Create a message attributed to the reserved system speaker.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(SYSTEM_USERNAME, text)
    }

    pub fn is_system(&self) -> bool {
        self.username == SYSTEM_USERNAME
    }
}

/// An ordered conversation, oldest message first.
pub type Conversation = Vec<ConversationMessage>;
