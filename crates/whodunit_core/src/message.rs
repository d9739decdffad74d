//! Message types for conversation history.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A role-tagged text message in a conversation.
///
/// # Examples
///
/// ```
/// use whodunit_core::{Message, Role};
///
/// let message = Message::user("写一个剧本杀");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "写一个剧本杀");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}
