//! Domain-level response envelope shared by every gateway action.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Classification of a server [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageType {
    /// The action succeeded or carries informational text.
    Info,
    /// The action was rejected; always a recoverable domain condition.
    Error,
}

/// Domain response from the server, orthogonal to transport status.
///
/// A rejected move or submit arrives as an `ERROR` message, never as an HTTP
/// failure; the state machine routes it back to a turn-consistent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Message {
    /// Whether this is an `INFO` or `ERROR` message.
    #[serde(rename = "type")]
    message_type: MessageType,
    /// Display-worthy text from the server.
    text: String,
}

impl Message {
    /// Creates an `INFO` message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Info,
            text: text.into(),
        }
    }

    /// Creates an `ERROR` message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            message_type: MessageType::Error,
            text: text.into(),
        }
    }

    /// Queries whether the server reported success.
    pub fn is_info(&self) -> bool {
        self.message_type == MessageType::Info
    }

    /// Queries whether the server rejected the action.
    pub fn is_error(&self) -> bool {
        self.message_type == MessageType::Error
    }
}
