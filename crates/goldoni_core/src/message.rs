//! Message types for backend conversations.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A text message in a backend conversation.
///
/// # Examples
///
/// ```
/// use goldoni_core::{Message, Role};
///
/// let message = Message::new(Role::User, "Continue the scene.");
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Create a message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
